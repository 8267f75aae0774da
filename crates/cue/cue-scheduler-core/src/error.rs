//! Error types for cue data.
//!
//! The scheduler itself never fails; these errors only surface when
//! validating cue definitions or building samples from untrusted input.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CueError {
    /// Target time outside `[0, 1]` or not finite.
    #[error("Cue {index} ('{name}') has invalid target time {time}; expected a finite value in [0, 1]")]
    InvalidTargetTime { index: usize, name: String, time: f32 },

    /// Playhead sample with a NaN or infinite component.
    #[error("Playhead sample is not finite: normalized_time={normalized_time}, length={length}")]
    NonFiniteSample { normalized_time: f32, length: f32 },
}

impl CueError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidTargetTime { .. } => "definition",
            Self::NonFiniteSample { .. } => "sample",
        }
    }
}
