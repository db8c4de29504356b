use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Per-collection input descriptor. Every field defaults rather than errors,
/// so a sparse descriptor still drives a (degraded) run.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CollectionInput {
    pub documents: Vec<DocumentRef>,
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DocumentRef {
    pub filename: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Persona {
    pub role: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JobToBeDone {
    pub task: String,
}

/// Load and parse the input descriptor. Any failure is logged and maps to
/// `None`; the caller skips the collection.
pub fn load_input(path: &Path) -> Option<CollectionInput> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(input) => Some(input),
        Err(e) => {
            warn!("failed to parse {}: {}", path.display(), e);
            None
        }
    }
}
