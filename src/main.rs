//! Building Layout - derive floor tiers and room grids from unit configurations
//!
//! This binary reads building files, prints the derived layout, and carries
//! room annotations across edits of the unit list.

use building_layout::cli::{CheckArgs, CliError, ConfigArgs, DeriveArgs, ExitCode, ReconcileArgs};
use building_layout::config::{Config, LogLevel};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Building Layout - derive floor tiers and room grids from unit configurations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive and print the layout of a building file
    Derive(DeriveArgs),
    /// Apply an edited building file to a saved state
    Reconcile(ReconcileArgs),
    /// Validate the annotations of a saved state
    Check(CheckArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

/// Sets up logging to stderr so JSON on stdout stays machine-readable.
fn init_tracing(verbose: bool, level: LogLevel) {
    let filter = if verbose {
        LogLevel::Debug.as_filter()
    } else {
        level.as_filter()
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config_result = Config::load();
    let level = config_result
        .as_ref()
        .map(|config| config.log.level)
        .unwrap_or_default();
    init_tracing(cli.verbose, level);

    if let Err(e) = &config_result {
        tracing::warn!("Failed to load config, using defaults: {e:#}");
    }

    let result: Result<(), CliError> = match &cli.command {
        Command::Derive(args) => args.execute(),
        Command::Reconcile(args) => args.execute(),
        Command::Check(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    match result {
        Ok(()) => std::process::exit(ExitCode::Success.code()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code.code());
        }
    }
}
