//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the privsense configuration file.

use crate::classify::PatternRegistry;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("Failed to load configuration file");
                println!("  Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Validation already ran inside load_config; surface the summary
        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Classification Mode: {}", config.classify.mode);
        println!("  Sample Size: {}", config.classify.sample_size);

        match &config.classify.patterns_file {
            Some(path) => {
                println!("  Pattern Library: {path}");
                if let Err(e) = PatternRegistry::from_file(path) {
                    println!("  Pattern library failed to load");
                    println!("  Error: {e}");
                    return Ok(2);
                }
                println!("  Pattern library loaded successfully");
            }
            None => println!("  Pattern Library: built-in"),
        }

        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}
