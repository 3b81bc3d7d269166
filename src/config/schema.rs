//! Configuration schema types

use crate::classify::ClassificationMode;
use crate::domain::DEFAULT_SAMPLE_SIZE;
use serde::{Deserialize, Serialize};

/// Root configuration, mapped from the TOML file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PrivsenseConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Classification settings
    #[serde(default)]
    pub classify: ClassifyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PrivsenseConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.classify.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Classification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// Classification mode (rule_only, enhanced, hybrid)
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Number of values sampled per column
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Optional path to a pattern library TOML file overriding the
    /// built-in one
    #[serde(default)]
    pub patterns_file: Option<String>,
}

impl ClassifyConfig {
    fn validate(&self) -> Result<(), String> {
        if ClassificationMode::parse(&self.mode).is_none() {
            return Err(format!(
                "Invalid classify.mode '{}'. Must be one of: rule_only, enhanced, hybrid",
                self.mode
            ));
        }

        if self.sample_size == 0 || self.sample_size > 10_000 {
            return Err(format!(
                "classify.sample_size must be between 1 and 10000, got {}",
                self.sample_size
            ));
        }

        Ok(())
    }

    /// The parsed classification mode; validated, so this cannot fail
    /// after [`PrivsenseConfig::validate`].
    pub fn parsed_mode(&self) -> ClassificationMode {
        ClassificationMode::parse(&self.mode).unwrap_or_default()
    }
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            sample_size: default_sample_size(),
            patterns_file: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_mode() -> String {
    "hybrid".to_string()
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
