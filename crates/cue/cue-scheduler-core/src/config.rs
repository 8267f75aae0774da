//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// How the very first update after `enter` decides whether a cue is due.
///
/// There is no previous sample to build a crossing interval from, so the
/// first sample can only match a cue by position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value")]
pub enum FirstSampleMatch {
    /// Fire only when the sample's phase equals the cue's target time exactly.
    #[default]
    Exact,
    /// Fire when the phase is within `tolerance` of the target, measured
    /// around the loop so that 0.99 is close to 0.0.
    Tolerance(f32),
}

impl FirstSampleMatch {
    #[inline]
    pub fn matches(&self, phase: f32, target: f32) -> bool {
        match *self {
            FirstSampleMatch::Exact => phase == target,
            FirstSampleMatch::Tolerance(tol) => {
                let d = (phase - target).abs();
                d.min(1.0 - d) <= tol.abs()
            }
        }
    }
}

/// Configuration for a [`crate::CueScheduler`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub first_sample: FirstSampleMatch,

    /// Initial capacity hint for the per-call fired-cue buffer.
    #[serde(default = "default_fired_capacity")]
    pub fired_capacity: usize,
}

fn default_fired_capacity() -> usize {
    16
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            first_sample: FirstSampleMatch::default(),
            fired_capacity: default_fired_capacity(),
        }
    }
}
