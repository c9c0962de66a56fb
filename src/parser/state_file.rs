//! Building state snapshots (JSON).
//!
//! Snapshots let the command line carry annotations from one run to the
//! next. The file is the serialized [`BuildingState`] plus a header.

use crate::models::BuildingState;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Snapshot schema version written by this build.
pub const STATE_FILE_VERSION: &str = "1.0";

/// On-disk form of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFile {
    /// Schema version
    pub version: String,
    /// When the snapshot was written
    pub saved_at: DateTime<Utc>,
    /// The snapshot itself
    #[serde(flatten)]
    pub state: BuildingState,
}

impl StateFile {
    /// Wraps a state with the current version and timestamp.
    #[must_use]
    pub fn new(state: BuildingState) -> Self {
        Self {
            version: STATE_FILE_VERSION.to_string(),
            saved_at: Utc::now(),
            state,
        }
    }
}

/// Parses snapshot JSON.
pub fn parse_state_str(content: &str) -> Result<BuildingState> {
    let file: StateFile = serde_json::from_str(content).context("Failed to parse state JSON")?;

    if file.version != STATE_FILE_VERSION {
        anyhow::bail!(
            "Unsupported state file version '{}' (expected {})",
            file.version,
            STATE_FILE_VERSION
        );
    }

    Ok(file.state)
}

/// Reads a snapshot from disk.
pub fn load_state(path: &Path) -> Result<BuildingState> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file: {}", path.display()))?;

    parse_state_str(&content).with_context(|| format!("Invalid state file: {}", path.display()))
}

/// Serializes a state as snapshot JSON.
pub fn state_to_string(state: &BuildingState, pretty: bool) -> Result<String> {
    let file = StateFile::new(state.clone());
    let content = if pretty {
        serde_json::to_string_pretty(&file)
    } else {
        serde_json::to_string(&file)
    };
    content.context("Failed to serialize state")
}

/// Writes a snapshot using a temp file + rename so the target is never half-written.
pub fn save_state(state: &BuildingState, path: &Path, pretty: bool) -> Result<()> {
    let content = state_to_string(state, pretty)?;
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temp state file: {}", temp_path.display()))?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp state file to: {}", path.display()))?;

    Ok(())
}
