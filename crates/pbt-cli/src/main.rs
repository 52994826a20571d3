//! pbt CLI
//!
//! Plans the build commands a plugin registers for a target and prints them
//! as JSON, the way a host build system would receive them.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::PlanRequest;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    pbt_core::logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Cannot initialize logging: {e}")))?;
    tracing::debug!("verbose mode enabled");

    match cli.command {
        Commands::Plan {
            plugin,
            context,
            target,
            config,
            platform,
            search_path,
            current_dir,
        } => commands::run_plan(&PlanRequest {
            plugin,
            context,
            target,
            config,
            platform,
            search_path,
            current_dir,
        }),
        Commands::Plugins => commands::run_plugins(),
    }
}
