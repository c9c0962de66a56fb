//! Parsing and serialization for building files and state snapshots.
//!
//! This module handles reading the user-entered building configuration
//! (TOML or JSON) and reading/writing derived state snapshots (JSON).

pub mod building_file;
pub mod state_file;

// Re-export commonly used functions
pub use building_file::{parse_building_file, BuildingFile, FileFormat};
pub use state_file::{load_state, save_state};
