//! Output contracts from the scheduler.
//!
//! Each lifecycle call returns the cues that fired during that call, in
//! firing order. Records point back into the scheduler's [`crate::CueSet`]
//! by slot; adapters resolve them and hand the definitions to a dispatcher.

use serde::{Deserialize, Serialize};

use crate::ids::RunId;

/// Where a fired cue lives in its [`crate::CueSet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CueSlot {
    Enter,
    Exit,
    /// Index into `CueSet::cues`.
    Timed(usize),
}

/// One fired cue.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FiredCue {
    pub run: RunId,
    pub slot: CueSlot,
    /// Cycle of the sample that fired the cue; `None` for the enter cue.
    pub cycle: Option<i32>,
    /// Normalized time of the sample that fired the cue; `None` for the enter cue.
    pub normalized_time: Option<f32>,
    /// Seconds into the firing sample's cycle; `None` for the enter cue.
    pub seconds_into_cycle: Option<f32>,
}

/// Fired cues produced by one lifecycle call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CueOutputs {
    #[serde(default)]
    pub fired: Vec<FiredCue>,
}

impl CueOutputs {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            fired: Vec::with_capacity(cap),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.fired.clear();
    }

    #[inline]
    pub fn push(&mut self, cue: FiredCue) {
        self.fired.push(cue);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fired.len()
    }

    pub fn slots(&self) -> impl Iterator<Item = CueSlot> + '_ {
        self.fired.iter().map(|f| f.slot)
    }

    /// Number of times the timed cue at `index` fired in this call.
    pub fn count_timed(&self, index: usize) -> usize {
        self.slots().filter(|s| *s == CueSlot::Timed(index)).count()
    }
}
