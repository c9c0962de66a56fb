//! Check command: validate the annotations of a state snapshot.

use crate::cli::common::{load_config, to_json, CliError, CliResult};
use crate::parser::load_state;
use crate::services::reconcile::{dangling_partners, invalid_annotations, rederive};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Validate a state file's annotations against its own layout
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Path to state snapshot (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub state: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// JSON response for the check command
#[derive(Debug, Serialize)]
struct CheckResponse {
    valid: bool,
    messages: Vec<CheckMessage>,
}

/// A single finding
#[derive(Debug, Serialize)]
struct CheckMessage {
    severity: String,
    kind: String,
    address: Option<String>,
    message: String,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let stored = load_state(&self.state)
            .map_err(|e| CliError::io(format!("Failed to load state: {e:#}")))?;

        let mut messages = Vec::new();

        // Annotations are checked against the layout their units derive, not
        // the derived fields stored in the snapshot
        let state = match rederive(&stored) {
            Ok(derived) => {
                if derived.layout != stored.layout {
                    messages.push(CheckMessage {
                        severity: "error".to_string(),
                        kind: "layout".to_string(),
                        address: None,
                        message: "Stored layout does not match the layout derived from its units"
                            .to_string(),
                    });
                }
                derived
            }
            Err(e) => {
                messages.push(CheckMessage {
                    severity: "error".to_string(),
                    kind: "layout".to_string(),
                    address: None,
                    message: format!("Units cannot be derived: {e}"),
                });
                stored
            }
        };

        for invalid in invalid_annotations(&state) {
            messages.push(CheckMessage {
                severity: "error".to_string(),
                kind: invalid.kind.to_string(),
                address: Some(invalid.address.to_string()),
                message: format!("Room {} {}", invalid.address, invalid.reason),
            });
        }

        // Partners are not cascaded on reconcile, so these are only warnings
        for dangling in dangling_partners(&state) {
            messages.push(CheckMessage {
                severity: "warning".to_string(),
                kind: dangling.kind.to_string(),
                address: Some(dangling.address.to_string()),
                message: format!(
                    "Partner {} of room {} is not part of the building",
                    dangling.partner, dangling.address
                ),
            });
        }

        let has_errors = messages.iter().any(|m| m.severity == "error");
        let has_warnings = messages.iter().any(|m| m.severity == "warning");
        let response = CheckResponse {
            valid: !has_errors,
            messages,
        };

        if self.json {
            println!("{}", to_json(&response, config.output.pretty_json)?);
        } else {
            if response.valid {
                println!("✓ Annotations valid");
            } else {
                println!("✗ Annotations invalid");
            }
            println!(
                "  Merged rooms:   {}\n  Elevated rooms: {}",
                state.merged_rooms.len(),
                state.elevated_rooms.len()
            );

            if !response.messages.is_empty() {
                println!("\nIssues:");
                for msg in &response.messages {
                    let prefix = if msg.severity == "error" { "  ✗" } else { "  ⚠" };
                    println!("{} [{}] {}", prefix, msg.kind, msg.message);
                }
            }
        }

        if !response.valid {
            return Err(CliError::validation("Annotation check failed"));
        }

        if self.strict && has_warnings {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}
