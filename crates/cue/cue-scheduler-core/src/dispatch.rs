//! Dispatcher seam between the scheduler and the host.
//!
//! The scheduler hands each fired cue to a [`CueDispatcher`] once, in firing
//! order, on the calling thread. What happens next (message send, listener
//! fan-out, audio trigger) belongs to the implementation.

use crate::definition::CueDefinition;

/// Receives fired cues. Return values are not consumed; delivery with no
/// observer is not an error.
pub trait CueDispatcher {
    fn dispatch(&mut self, cue: &CueDefinition);
}

impl<F> CueDispatcher for F
where
    F: FnMut(&CueDefinition),
{
    #[inline]
    fn dispatch(&mut self, cue: &CueDefinition) {
        (*self)(cue)
    }
}

/// Drops every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDispatcher;

impl CueDispatcher for NullDispatcher {
    #[inline]
    fn dispatch(&mut self, _cue: &CueDefinition) {}
}
