//! Playhead samples and the time math shared by the scheduler.
//!
//! Normalized time carries the loop count in its integer part and the phase
//! within the current loop in its fractional part. Reversed playback moves
//! it downward across the same integer boundaries.

use serde::{Deserialize, Serialize};

use crate::error::CueError;

/// One observation of an animating state's playhead.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayheadSample {
    #[serde(rename = "normalizedTime")]
    pub normalized_time: f32,
    /// Length of one cycle in seconds.
    #[serde(default)]
    pub length: f32,
}

impl PlayheadSample {
    #[inline]
    pub fn new(normalized_time: f32, length: f32) -> Self {
        Self {
            normalized_time,
            length,
        }
    }

    /// Like [`PlayheadSample::new`] but rejects NaN/infinite input.
    pub fn try_new(normalized_time: f32, length: f32) -> Result<Self, CueError> {
        if !normalized_time.is_finite() || !length.is_finite() {
            return Err(CueError::NonFiniteSample {
                normalized_time,
                length,
            });
        }
        Ok(Self::new(normalized_time, length))
    }

    #[inline]
    pub fn cycle(&self) -> i32 {
        cycle_of(self.normalized_time)
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        phase_of(self.normalized_time)
    }

    /// Time into the current cycle in seconds.
    #[inline]
    pub fn seconds_into_cycle(&self) -> f32 {
        self.phase() * self.length
    }
}

/// Loop cycle index: `floor(t)`.
#[inline]
pub fn cycle_of(t: f32) -> i32 {
    t.floor() as i32
}

/// Cycle-relative phase in [0,1).
#[inline]
pub fn phase_of(t: f32) -> f32 {
    t - t.floor()
}

/// Direction-aware half-open containment.
///
/// Forward (`end >= start`): `start < value <= end`.
/// Backward (`end < start`): `end < value <= start`.
#[inline]
pub fn time_range_contains(value: f32, start: f32, end: f32) -> bool {
    if end >= start {
        value > start && value <= end
    } else {
        value > end && value <= start
    }
}
