//! Per-run mutable tracking.

use serde::{Deserialize, Serialize};

use crate::ids::RunId;
use crate::sample::PlayheadSample;

/// Tracking for one cue within one run.
///
/// `last_dispatch_cycle` is cleared at every cycle boundary while
/// `dispatched_once` survives until the next enter. Non-repeating cues stay
/// spent for the whole run; repeating cues re-arm each cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueRuntimeState {
    pub dispatched_once: bool,
    pub last_dispatch_cycle: Option<i32>,
}

impl CueRuntimeState {
    #[inline]
    pub fn record_dispatch(&mut self, cycle: i32) {
        self.dispatched_once = true;
        self.last_dispatch_cycle = Some(cycle);
    }
}

/// State owned by a scheduler for one enter→exit run.
#[derive(Clone, Debug)]
pub struct RunContext {
    pub id: RunId,
    /// `None` until the first update of the run.
    pub last_sample: Option<PlayheadSample>,
    /// Index-aligned with the definition list.
    pub states: Vec<CueRuntimeState>,
}

impl RunContext {
    pub fn new(id: RunId, cue_count: usize) -> Self {
        Self {
            id,
            last_sample: None,
            states: vec![CueRuntimeState::default(); cue_count],
        }
    }

    /// Re-arm repeating cues for a new cycle.
    pub fn clear_cycle_marks(&mut self) {
        for state in &mut self.states {
            state.last_dispatch_cycle = None;
        }
    }
}
