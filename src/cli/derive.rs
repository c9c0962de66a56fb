//! Derive command: print the layout computed from a building file.

use crate::cli::common::{load_building, load_config, to_json, CliError, CliResult};
use crate::models::{BuildingLayout, FloorSpan, FloorTier};
use clap::Args;
use std::path::PathBuf;

/// Derive floor tiers and room lists from a building file
#[derive(Debug, Clone, Args)]
pub struct DeriveArgs {
    /// Path to building file (TOML or JSON)
    #[arg(short, long, value_name = "FILE")]
    pub building: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl DeriveArgs {
    /// Execute the derive command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let (name, units) = load_building(&self.building, &config)?;

        let layout = BuildingLayout::derive(name, &units)
            .map_err(|e| CliError::validation(format!("Failed to derive layout: {e}")))?;

        if self.json {
            println!("{}", to_json(&layout, config.output.pretty_json)?);
        } else {
            print!("{}", render_layout(&layout));
        }

        Ok(())
    }
}

/// Formats a floor span for terminal output.
pub(crate) fn format_span(span: FloorSpan) -> String {
    if span.is_empty() {
        "(none)".to_string()
    } else if span.start == span.end {
        format!("{}", span.start)
    } else {
        format!("{}-{}", span.start, span.end)
    }
}

/// Human-readable summary of a layout.
pub(crate) fn render_layout(layout: &BuildingLayout) -> String {
    let mut out = String::new();

    out.push_str(&format!("Building: {}\n", layout.building_name));
    out.push_str(&format!("Max floor: {}\n", layout.max_floor));

    out.push_str("\nFloor tiers:\n");
    for tier in FloorTier::ALL {
        out.push_str(&format!(
            "  {:<7} {}\n",
            format!("{}:", tier.display_name()),
            format_span(layout.floor_range.span(tier))
        ));
    }

    out.push_str("\nUnits:\n");
    for unit in &layout.units {
        out.push_str(&format!(
            "  Unit {}: {} elevator(s), {} room(s) per floor, {} floor(s)\n",
            unit.unit_no(),
            unit.spec.elevator_count,
            unit.room_count,
            unit.total_floors()
        ));
    }

    out.push_str(&format!("\nTotal rooms: {}\n", layout.room_total()));
    out
}
