//! # xrr
//!
//! **CLI Binary**
//!
//! This is the entry point for the `xrr` command-line application.
//! It loads datasets, hands them to `xrr-core`, and renders the report.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Load and merge configuration
//! * Dispatch commands to appropriate handlers
//! * Handle errors and exit codes
//!
//! This crate should contain minimal business logic.

mod cli;
mod commands;
mod config;
mod error_hints;
mod format;
mod input;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;

pub use cli::{Cli, Commands, GlobalArgs, IrepArgs, PartitionArgs, ScoreArgs};
pub use config::resolve_settings;

/// Entry point used by the `xrr` binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    let settings = resolve_settings(&cli.global)?;
    if let Some(threads) = settings.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let receipt = match &cli.command {
        Commands::Score(args) => commands::score::handle(args, &settings)?,
        Commands::Partition(args) => commands::partition::handle(args, &settings)?,
        Commands::Irep(args) => commands::irep::handle(args, &settings)?,
    };

    print!(
        "{}",
        format::render(&receipt, settings.format, settings.decimals)?
    );
    Ok(())
}

/// Renders an error with its cause chain and any actionable hints.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}
