//! Authored cue definitions.
//!
//! A [`CueDefinition`] is immutable once built; the builder-style methods
//! consume and return `self`. A [`CueSet`] groups the timed cues of one
//! animation state together with its enter and exit cues.

use serde::{Deserialize, Serialize};

use crate::error::CueError;
use crate::payload::CuePayload;

const UNNAMED_LABEL: &str = "Unnamed animation event";

/// Static description of one scheduled cue.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CueDefinition {
    /// Logical name; receivers key their listeners by it. Empty names are never delivered.
    #[serde(default)]
    name: String,
    /// Cycle-relative normalized time in [0,1].
    #[serde(default, rename = "targetTime")]
    target_time: f32,
    #[serde(default, rename = "alwaysTrigger")]
    always_trigger: bool,
    #[serde(default, rename = "repeatOnLoop")]
    repeat_on_loop: bool,
    #[serde(default)]
    payload: CuePayload,
    #[serde(default, rename = "debugLog")]
    debug_log: bool,
    #[serde(default, rename = "debugLabel")]
    debug_label: String,
}

impl CueDefinition {
    /// Create a cue at `target_time`, clamped into [0,1]. NaN maps to 0.
    pub fn new(name: impl Into<String>, target_time: f32) -> Self {
        Self {
            name: name.into(),
            target_time: clamp01(target_time),
            ..Self::default()
        }
    }

    /// A cue with no timing, used for the enter and exit slots.
    pub fn lifecycle(name: impl Into<String>) -> Self {
        Self::new(name, 0.0)
    }

    pub fn always_trigger(mut self, on: bool) -> Self {
        self.always_trigger = on;
        self
    }

    pub fn repeat_on_loop(mut self, on: bool) -> Self {
        self.repeat_on_loop = on;
        self
    }

    pub fn with_payload(mut self, payload: CuePayload) -> Self {
        self.payload = payload;
        self
    }

    /// Log the cue at `debug` level whenever it is forwarded. An empty label
    /// falls back to the cue name.
    pub fn with_debug_log(mut self, label: impl Into<String>) -> Self {
        self.debug_log = true;
        self.debug_label = label.into();
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn target_time(&self) -> f32 {
        self.target_time
    }

    #[inline]
    pub fn is_always_trigger(&self) -> bool {
        self.always_trigger
    }

    #[inline]
    pub fn is_repeat_on_loop(&self) -> bool {
        self.repeat_on_loop
    }

    #[inline]
    pub fn payload(&self) -> &CuePayload {
        &self.payload
    }

    #[inline]
    pub fn debug_log(&self) -> bool {
        self.debug_log
    }

    /// Label used in debug logs: explicit label, then name, then a fixed fallback.
    pub fn debug_label(&self) -> &str {
        if !self.debug_label.is_empty() {
            &self.debug_label
        } else if !self.name.is_empty() {
            &self.name
        } else {
            UNNAMED_LABEL
        }
    }
}

fn clamp01(t: f32) -> f32 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// All cues attached to one animation state.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CueSet {
    #[serde(default, rename = "onEnter")]
    pub on_enter: CueDefinition,
    #[serde(default, rename = "onExit")]
    pub on_exit: CueDefinition,
    #[serde(default)]
    pub cues: Vec<CueDefinition>,
}

impl CueSet {
    pub fn new(cues: Vec<CueDefinition>) -> Self {
        Self {
            cues,
            ..Self::default()
        }
    }

    pub fn with_enter(mut self, cue: CueDefinition) -> Self {
        self.on_enter = cue;
        self
    }

    pub fn with_exit(mut self, cue: CueDefinition) -> Self {
        self.on_exit = cue;
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Check that every timed cue has a finite target time in [0,1].
    /// Definitions built with [`CueDefinition::new`] always pass; this catches
    /// data that arrived through deserialization.
    pub fn validate(&self) -> Result<(), CueError> {
        for (index, cue) in self.cues.iter().enumerate() {
            let t = cue.target_time;
            if !t.is_finite() || !(0.0..=1.0).contains(&t) {
                return Err(CueError::InvalidTargetTime {
                    index,
                    name: cue.name.clone(),
                    time: t,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_target_time() {
        assert_eq!(CueDefinition::new("a", -0.5).target_time(), 0.0);
        assert_eq!(CueDefinition::new("b", 1.5).target_time(), 1.0);
        assert_eq!(CueDefinition::new("c", f32::NAN).target_time(), 0.0);
        assert_eq!(CueDefinition::new("d", 0.25).target_time(), 0.25);
    }

    #[test]
    fn builder_sets_policies() {
        let cue = CueDefinition::new("Footstep", 0.5)
            .always_trigger(true)
            .repeat_on_loop(true)
            .with_payload(CuePayload::Int(2));
        assert!(cue.is_always_trigger());
        assert!(cue.is_repeat_on_loop());
        assert_eq!(cue.payload(), &CuePayload::Int(2));
        assert!(!cue.debug_log());
    }

    #[test]
    fn debug_label_fallbacks() {
        let labelled = CueDefinition::new("Hit", 0.1).with_debug_log("hit frame");
        assert_eq!(labelled.debug_label(), "hit frame");
        let named = CueDefinition::new("Hit", 0.1).with_debug_log("");
        assert_eq!(named.debug_label(), "Hit");
        assert_eq!(CueDefinition::default().debug_label(), "Unnamed animation event");
    }

    #[test]
    fn validate_rejects_out_of_range_data() {
        let json = r#"{ "cues": [
            { "name": "ok", "targetTime": 0.5 },
            { "name": "late", "targetTime": 1.25 }
        ] }"#;
        let set: CueSet = serde_json::from_str(json).unwrap();
        match set.validate() {
            Err(CueError::InvalidTargetTime { index, name, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(name, "late");
            }
            other => panic!("unexpected validation result: {other:?}"),
        }
        assert!(CueSet::new(vec![CueDefinition::new("x", 3.0)]).validate().is_ok());
    }
}
