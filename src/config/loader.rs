//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PrivsenseConfig;
use crate::domain::errors::PrivsenseError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PrivsenseConfig
/// 4. Applies environment variable overrides (PRIVSENSE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
pub fn load_config(path: impl AsRef<Path>) -> Result<PrivsenseConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PrivsenseError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PrivsenseError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: PrivsenseConfig = toml::from_str(&contents)
        .map_err(|e| PrivsenseError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        PrivsenseError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads configuration from a file when one exists, otherwise defaults.
///
/// Environment overrides apply either way.
pub fn load_config_or_default(path: Option<impl AsRef<Path>>) -> Result<PrivsenseConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = PrivsenseConfig::default();
            apply_env_overrides(&mut config);
            config.validate().map_err(|e| {
                PrivsenseError::Configuration(format!("Configuration validation failed: {}", e))
            })?;
            Ok(config)
        }
    }
}

/// A commented configuration template for `privsense init`
pub fn default_config_template() -> &'static str {
    r#"# privsense configuration

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[classify]
# Classification mode: rule_only, enhanced, hybrid
mode = "hybrid"
# Number of values sampled per column
sample_size = 200
# Optional pattern library override
# patterns_file = "patterns/risk_patterns.toml"

[logging]
# Write JSON logs to rotating files in addition to the console
local_enabled = false
local_path = "logs"
# Rotation: daily, hourly, never
local_rotation = "daily"
"#
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PrivsenseError::Configuration(format!("Invalid substitution regex: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PrivsenseError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the PRIVSENSE_* prefix
///
/// Environment variables follow the pattern: PRIVSENSE_<SECTION>_<KEY>
/// For example: PRIVSENSE_CLASSIFY_MODE, PRIVSENSE_APPLICATION_LOG_LEVEL
fn apply_env_overrides(config: &mut PrivsenseConfig) {
    if let Ok(val) = std::env::var("PRIVSENSE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("PRIVSENSE_CLASSIFY_MODE") {
        config.classify.mode = val;
    }
    if let Ok(val) = std::env::var("PRIVSENSE_CLASSIFY_SAMPLE_SIZE") {
        if let Ok(size) = val.parse() {
            config.classify.sample_size = size;
        }
    }
    if let Ok(val) = std::env::var("PRIVSENSE_CLASSIFY_PATTERNS_FILE") {
        config.classify.patterns_file = Some(val);
    }

    if let Ok(val) = std::env::var("PRIVSENSE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PRIVSENSE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("PRIVSENSE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("PRIVSENSE_TEST_VAR", "test_value");
        let input = "patterns_file = \"${PRIVSENSE_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "patterns_file = \"test_value\"\n");
        std::env::remove_var("PRIVSENSE_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("PRIVSENSE_MISSING_VAR");
        let input = "patterns_file = \"${PRIVSENSE_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# uses ${NOT_A_REAL_VAR}\nmode = \"hybrid\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${NOT_A_REAL_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[classify]
mode = "enhanced"
sample_size = 50
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.classify.mode, "enhanced");
        assert_eq!(config.classify.sample_size, 50);
    }

    #[test]
    fn test_load_config_rejects_invalid_mode() {
        let toml_content = r#"
[classify]
mode = "psychic"
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_default_template_parses_and_validates() {
        let config: PrivsenseConfig = toml::from_str(default_config_template()).unwrap();
        assert!(config.validate().is_ok());
    }
}
