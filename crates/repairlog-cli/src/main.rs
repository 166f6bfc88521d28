//! repairlog CLI - equipment inventories and call history from the terminal
//!
//! Reads exports produced by the shop's mail and phone adapters and prints
//! what the core library derives from them.

mod cli;
mod commands;
mod config;
mod error;

#[cfg(test)]
mod tests;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::calls::run_calls;
use crate::commands::completions::run_completions;
use crate::commands::extract::run_extract;
use crate::commands::inventory::run_inventory;
use crate::commands::preview::run_preview;
use crate::config::CliConfig;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("repairlog=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Completions { shell, output } = &cli.command {
        return run_completions(*shell, output.as_deref());
    }

    let config = CliConfig::load(cli.config.as_deref()).map_err(CliError::Config)?;

    match cli.command {
        Commands::Extract { input, json } => run_extract(input.as_deref(), json)?,
        Commands::Inventory {
            notes,
            format,
            output,
            client,
        } => run_inventory(
            &notes,
            format,
            output.as_deref(),
            client.as_deref(),
            &config.shop,
        )?,
        Commands::Calls {
            call_log,
            timeline,
            client,
            phones,
            json,
        } => run_calls(
            call_log.as_deref(),
            timeline.as_deref(),
            client.as_deref(),
            &phones,
            json,
            &config,
        )?,
        Commands::Preview {
            input,
            lines,
            levels,
        } => run_preview(input.as_deref(), lines, levels, &config.shop)?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}
