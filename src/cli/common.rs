//! Shared CLI types: errors, exit codes and output helpers.

use crate::config::Config;
use crate::models::UnitSpec;
use crate::parser::parse_building_file;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Process exit codes used by all commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was read but failed validation
    ValidationError = 1,
    /// Input could not be read, parsed or written
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands, carrying its exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code for this failure
    pub exit_code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// I/O or parse failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::IoError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Serializes `value` as JSON, pretty or compact.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> CliResult<String> {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))
}

/// Loads the user configuration, falling back to defaults if it cannot be read.
pub fn load_config() -> Config {
    Config::load().unwrap_or_default()
}

/// Reads a building file and resolves its name against the configured default.
pub fn load_building(path: &Path, config: &Config) -> CliResult<(String, Vec<UnitSpec>)> {
    let file = parse_building_file(path)
        .map_err(|e| CliError::io(format!("Failed to load building: {e:#}")))?;
    let name = file.name_or(&config.defaults.building_name).to_string();
    Ok((name, file.units))
}
