//! Cue Scheduler Core (engine-agnostic)
//!
//! Fires discrete cues against the sampled playhead of a looping animation
//! state. Hosts drive one [`CueScheduler`] per state instance through
//! `enter` / `update` / `exit` and forward the fired cues to a
//! [`CueDispatcher`]. Each cue fires exactly as often as its policy allows,
//! even when frames are skipped, playback reverses, or the loop wraps.

pub mod config;
pub mod definition;
pub mod dispatch;
pub mod error;
pub mod ids;
pub mod outputs;
pub mod payload;
pub mod receiver;
pub mod runtime;
pub mod sample;
pub mod scheduler;

// Re-exports for consumers (adapters)
pub use config::{FirstSampleMatch, SchedulerConfig};
pub use definition::{CueDefinition, CueSet};
pub use dispatch::{CueDispatcher, NullDispatcher};
pub use error::CueError;
pub use ids::{IdAllocator, ListenerId, RunId};
pub use outputs::{CueOutputs, CueSlot, FiredCue};
pub use payload::{CuePayload, PayloadKind};
pub use receiver::CueReceiver;
pub use runtime::{CueRuntimeState, RunContext};
pub use sample::{cycle_of, phase_of, time_range_contains, PlayheadSample};
pub use scheduler::{CueScheduler, RunPhase};
