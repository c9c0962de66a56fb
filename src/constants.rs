//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and config locations.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Building Layout";

/// Directory name under the platform config directory.
pub const APP_CONFIG_DIR_NAME: &str = "BuildingLayout";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "BUILDING_LAYOUT_CONFIG_DIR";
