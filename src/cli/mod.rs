//! CLI command handlers.
//!
//! This module provides headless, scriptable access to layout derivation and
//! annotation reconciliation for automation and testing.

pub mod check;
pub mod common;
pub mod config;
pub mod derive;
pub mod reconcile;

// Re-export types used by main.rs and tests
pub use check::CheckArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use derive::DeriveArgs;
pub use reconcile::ReconcileArgs;
