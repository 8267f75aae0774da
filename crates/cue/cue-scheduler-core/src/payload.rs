//! Cue payloads: the typed argument a fired cue carries to its receiver.
//! The scheduler forwards payloads verbatim and never inspects them.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    None,
    Int,
    Float,
    Text,
    Object,
    Event,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum CuePayload {
    /// No argument.
    #[default]
    None,
    Int(i32),
    Float(f32),
    Text(String),
    /// Opaque host object handle (asset path, entity name, ...).
    Object(String),
    /// The receiver gets the cue definition itself.
    Event,
}

impl CuePayload {
    #[inline]
    pub fn kind(&self) -> PayloadKind {
        match self {
            CuePayload::None => PayloadKind::None,
            CuePayload::Int(_) => PayloadKind::Int,
            CuePayload::Float(_) => PayloadKind::Float,
            CuePayload::Text(_) => PayloadKind::Text,
            CuePayload::Object(_) => PayloadKind::Object,
            CuePayload::Event => PayloadKind::Event,
        }
    }
}
