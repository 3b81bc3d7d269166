//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for privsense using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// privsense - privacy risk assessment for tabular datasets
#[derive(Parser, Debug)]
#[command(name = "privsense")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "PRIVSENSE_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PRIVSENSE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess the privacy risk of a CSV dataset
    Assess(commands::assess::AssessArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_assess() {
        let cli = Cli::parse_from(["privsense", "assess", "data.csv"]);
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Commands::Assess(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["privsense", "--config", "custom.toml", "assess", "data.csv"]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["privsense", "--log-level", "debug", "assess", "data.csv"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["privsense", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["privsense", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
