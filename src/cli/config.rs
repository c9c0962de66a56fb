//! Configuration management CLI commands.

use crate::cli::common::{to_json, CliError, CliResult};
use crate::config::{Config, LogLevel};
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Building name used when a building file has none
    #[arg(long, value_name = "NAME")]
    building_name: Option<String>,

    /// Default log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Pretty-print JSON output (true or false)
    #[arg(long, value_name = "BOOL")]
    pretty_json: Option<bool>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    path: String,
    defaults: DefaultsOutput,
    output: OutputOutput,
    log: LogOutput,
}

#[derive(Serialize, Debug)]
struct DefaultsOutput {
    building_name: String,
}

#[derive(Serialize, Debug)]
struct OutputOutput {
    pretty_json: bool,
}

#[derive(Serialize, Debug)]
struct LogOutput {
    level: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let path = Config::config_file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "(unknown)".to_string());

        if self.json {
            let output = ConfigOutput {
                path,
                defaults: DefaultsOutput {
                    building_name: config.defaults.building_name.clone(),
                },
                output: OutputOutput {
                    pretty_json: config.output.pretty_json,
                },
                log: LogOutput {
                    level: config.log.level.as_filter().to_string(),
                },
            };
            println!("{}", to_json(&output, true)?);
        } else {
            output_human_readable(&config, &path);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.building_name.is_none() && self.log_level.is_none() && self.pretty_json.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --building-name, --log-level, or --pretty-json",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(name) = &self.building_name {
            config
                .set_building_name(name.clone())
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(level) = &self.log_level {
            config.log.level = level
                .parse::<LogLevel>()
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(pretty) = self.pretty_json {
            config.output.pretty_json = pretty;
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config, path: &str) {
    let title = format!("{APP_NAME} Configuration");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!("File: {path}");
    println!();

    println!("Defaults:");
    println!("  Building Name: {}", config.defaults.building_name);
    println!();

    println!("Output:");
    println!("  Pretty JSON: {}", config.output.pretty_json);
    println!();

    println!("Log:");
    println!("  Level: {}", config.log.level.as_filter());
}
