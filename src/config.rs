//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{APP_CONFIG_DIR_NAME, CONFIG_DIR_ENV};

/// Log verbosity used when neither `--verbose` nor `RUST_LOG` is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Reconciliation summaries
    #[default]
    Info,
    /// Every dropped annotation
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => anyhow::bail!(
                "Invalid log level '{other}'. Must be one of: error, warn, info, debug, trace"
            ),
        }
    }
}

/// Defaults applied to building files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Building name used when a building file does not name one
    #[serde(default = "default_building_name")]
    pub building_name: String,
}

/// Default building name
fn default_building_name() -> String {
    "Untitled Building".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            building_name: default_building_name(),
        }
    }
}

/// Output preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output and state files
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

/// Default for pretty JSON output
const fn default_pretty_json() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: default_pretty_json(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LogConfig {
    /// Default log level
    #[serde(default)]
    pub level: LogLevel,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/BuildingLayout/config.toml`
/// - macOS: `~/Library/Application Support/BuildingLayout/config.toml`
/// - Windows: `%APPDATA%\BuildingLayout\config.toml`
///
/// The directory can be overridden with the `BUILDING_LAYOUT_CONFIG_DIR`
/// environment variable.
///
/// # Validation
///
/// - `defaults.building_name` must be non-empty, max 100 characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Defaults for building files
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging preferences
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// Uses `BUILDING_LAYOUT_CONFIG_DIR` when set, otherwise the
    /// platform-specific config directory.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        Self::validate_building_name(&self.defaults.building_name)
    }

    /// Validates a building name.
    pub fn validate_building_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Building name cannot be empty");
        }

        if name.chars().count() > 100 {
            anyhow::bail!(
                "Building name '{}' exceeds maximum length of 100 characters (got {})",
                name,
                name.chars().count()
            );
        }

        Ok(())
    }

    /// Sets the default building name with validation.
    pub fn set_building_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        Self::validate_building_name(&name)?;
        self.defaults.building_name = name;
        Ok(())
    }
}
