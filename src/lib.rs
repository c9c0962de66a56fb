//! Building Layout Library
//!
//! This library derives a building's floor tiers and per-unit room lists from
//! a small unit configuration, and keeps user annotations (merged and duplex
//! rooms) consistent when that configuration is edited.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod parser;
pub mod services;
