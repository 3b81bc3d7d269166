// privsense - Privacy Risk Assessment for Tabular Datasets
// Copyright (c) 2025 privsense Contributors
// Licensed under the MIT License

use clap::Parser;
use privsense::cli::{Cli, Commands};
use privsense::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging with console-only config (no file logging for CLI)
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = privsense::config::LoggingConfig::default();
    if let Err(e) = init_logging(log_level, &logging_config) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(5);
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "privsense starting");

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Assess(args) => args.execute(cli.config.as_deref()),
        Commands::ValidateConfig(args) => {
            args.execute(cli.config.as_deref().unwrap_or("privsense.toml"))
        }
        Commands::Init(args) => args.execute(),
    }
}
