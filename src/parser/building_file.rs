//! Building configuration files.
//!
//! A building file holds what the user enters: the building name and the
//! unit list. TOML is the default format; files ending in `.json` are read
//! as JSON.

use crate::models::UnitSpec;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File format of a building file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// TOML (`.toml` or any other extension)
    Toml,
    /// JSON (`.json`)
    Json,
}

impl FileFormat {
    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Contents of a building file.
///
/// # File Format
///
/// ```toml
/// building_name = "Tower A"
///
/// [[units]]
/// unit_no = 1
/// elevator_count = 2
/// rooms_per_elevator = 2
/// total_floors = 13
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingFile {
    /// Building name; the configured default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_name: Option<String>,
    /// Units in display order
    #[serde(default)]
    pub units: Vec<UnitSpec>,
}

impl BuildingFile {
    /// Returns the building name, or `fallback` if the file has none.
    #[must_use]
    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.building_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(fallback)
    }
}

/// Parses building file content in the given format.
///
/// # Examples
///
/// ```
/// use building_layout::parser::building_file::{parse_building_str, FileFormat};
///
/// let content = r#"
/// building_name = "Tower A"
/// [[units]]
/// unit_no = 1
/// elevator_count = 2
/// rooms_per_elevator = "abc"
/// total_floors = 9
/// "#;
/// let file = parse_building_str(content, FileFormat::Toml).unwrap();
/// assert_eq!(file.units[0].room_count(), 4);
/// ```
pub fn parse_building_str(content: &str, format: FileFormat) -> Result<BuildingFile> {
    let file: BuildingFile = match format {
        FileFormat::Toml => toml::from_str(content).context("Failed to parse building TOML")?,
        FileFormat::Json => {
            serde_json::from_str(content).context("Failed to parse building JSON")?
        }
    };

    if file.units.is_empty() {
        anyhow::bail!("Building file must define at least one unit");
    }

    Ok(file)
}

/// Reads and parses a building file.
pub fn parse_building_file(path: &Path) -> Result<BuildingFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read building file: {}", path.display()))?;

    parse_building_str(&content, FileFormat::from_path(path))
        .with_context(|| format!("Invalid building file: {}", path.display()))
}

/// Serializes a building file in the given format.
pub fn building_to_string(file: &BuildingFile, format: FileFormat) -> Result<String> {
    match format {
        FileFormat::Toml => toml::to_string_pretty(file).context("Failed to serialize building TOML"),
        FileFormat::Json => {
            serde_json::to_string_pretty(file).context("Failed to serialize building JSON")
        }
    }
}
