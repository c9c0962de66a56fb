//! Reconcile command: apply an edited unit list to a saved state.

use crate::cli::common::{load_config, to_json, CliError, CliResult};
use crate::models::normalize_units;
use crate::parser::state_file::state_to_string;
use crate::parser::{load_state, parse_building_file, save_state};
use crate::services::reconcile::{reconcile, DroppedAnnotation};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Apply a building file to a saved state, dropping annotations that no longer fit
#[derive(Debug, Clone, Args)]
pub struct ReconcileArgs {
    /// Path to the previous state snapshot (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub state: PathBuf,

    /// Path to the edited building file (TOML or JSON)
    #[arg(short, long, value_name = "FILE")]
    pub building: PathBuf,

    /// Write the new state here instead of printing it
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the summary as JSON (with --output)
    #[arg(long)]
    pub json: bool,
}

/// JSON summary of a reconciliation
#[derive(Debug, Serialize)]
struct ReconcileResponse {
    output: String,
    max_floor: u32,
    merged_rooms: usize,
    elevated_rooms: usize,
    dropped: Vec<DroppedData>,
}

/// Dropped annotation for JSON output
#[derive(Debug, Serialize)]
struct DroppedData {
    kind: String,
    address: String,
    reason: String,
}

impl From<&DroppedAnnotation> for DroppedData {
    fn from(dropped: &DroppedAnnotation) -> Self {
        Self {
            kind: dropped.kind.to_string(),
            address: dropped.address.to_string(),
            reason: dropped.reason.to_string(),
        }
    }
}

impl ReconcileArgs {
    /// Execute the reconcile command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();

        let previous = load_state(&self.state)
            .map_err(|e| CliError::io(format!("Failed to load state: {e:#}")))?;
        let building = parse_building_file(&self.building)
            .map_err(|e| CliError::io(format!("Failed to load building: {e:#}")))?;

        // A building file without a name keeps the state's name
        let name = building.name_or(&previous.layout.building_name).to_string();

        let units = normalize_units(&building.units);
        let result = reconcile(&previous, name, &units)
            .map_err(|e| CliError::validation(format!("Failed to reconcile: {e}")))?;

        let Some(output) = &self.output else {
            let content = state_to_string(&result.state, config.output.pretty_json)
                .map_err(|e| CliError::io(format!("{e:#}")))?;
            println!("{content}");
            for dropped in &result.dropped {
                eprintln!(
                    "Dropped {} {}: {}",
                    dropped.kind, dropped.address, dropped.reason
                );
            }
            return Ok(());
        };

        save_state(&result.state, output, config.output.pretty_json)
            .map_err(|e| CliError::io(format!("Failed to write state: {e:#}")))?;

        if self.json {
            let response = ReconcileResponse {
                output: output.display().to_string(),
                max_floor: result.state.layout.max_floor,
                merged_rooms: result.state.merged_rooms.len(),
                elevated_rooms: result.state.elevated_rooms.len(),
                dropped: result.dropped.iter().map(DroppedData::from).collect(),
            };
            println!("{}", to_json(&response, config.output.pretty_json)?);
        } else {
            println!("✓ State written to {}", output.display());
            println!(
                "  Kept: {} merged, {} elevated",
                result.state.merged_rooms.len(),
                result.state.elevated_rooms.len()
            );
            if result.dropped.is_empty() {
                println!("  No annotations dropped");
            } else {
                println!("  Dropped:");
                for dropped in &result.dropped {
                    println!(
                        "    - {} {}: {}",
                        dropped.kind, dropped.address, dropped.reason
                    );
                }
            }
        }

        Ok(())
    }
}
