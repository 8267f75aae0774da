use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(rename = "cue-sets")]
    cue_sets: HashMap<String, String>,
    traces: HashMap<String, TraceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TraceEntry {
    Path(String),
    Detailed { path: String },
}

impl TraceEntry {
    fn as_path(&self) -> &str {
        match self {
            TraceEntry::Path(path) => path,
            TraceEntry::Detailed { path } => path,
        }
    }
}

/// Resolve `rel` against the workspace `fixtures/` directory and parse it.
fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../../fixtures")
        .join(rel);
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Cue sets as authored data (the core crate's `CueSet` JSON shape).
pub mod cue_sets {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.cue_sets.keys().cloned().collect()
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.cue_sets, "cue set", name)?;
        super::load_json(rel)
    }
}

/// Recorded playhead traces: a cue set name, the sampled normalized times,
/// the exit time, and the expected firing count per cue name.
pub mod traces {
    use super::*;

    #[derive(Debug, Clone, Deserialize)]
    pub struct Trace {
        #[serde(rename = "cueSet")]
        pub cue_set: String,
        #[serde(default = "default_length")]
        pub length: f32,
        pub samples: Vec<f32>,
        #[serde(default)]
        pub exit: Option<f32>,
        pub expected: HashMap<String, usize>,
    }

    fn default_length() -> f32 {
        1.0
    }

    pub fn keys() -> Vec<String> {
        MANIFEST.traces.keys().cloned().collect()
    }

    pub fn load(name: &str) -> Result<Trace> {
        let entry = lookup(&MANIFEST.traces, "trace", name)?;
        super::load_json(entry.as_path())
    }
}
