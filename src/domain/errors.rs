//! Domain error types
//!
//! Errors are domain-specific and don't expose third-party types; the
//! classification core itself is designed to never fail a request, so
//! these surface only from the crate's edges (configuration, pattern
//! loading, dataset input, report output).

use thiserror::Error;

/// Main privsense error type
#[derive(Debug, Error)]
pub enum PrivsenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Pattern library loading/compilation errors
    #[error("Pattern library error: {0}")]
    Pattern(String),

    /// Dataset input errors (unreadable or structurally empty input)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Statistical model errors (invalid corpus, training failure)
    #[error("Model error: {0}")]
    Model(String),

    /// Report generation/output errors
    #[error("Report error: {0}")]
    Report(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for PrivsenseError {
    fn from(err: std::io::Error) -> Self {
        PrivsenseError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PrivsenseError {
    fn from(err: serde_json::Error) -> Self {
        PrivsenseError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for PrivsenseError {
    fn from(err: toml::de::Error) -> Self {
        PrivsenseError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for PrivsenseError {
    fn from(err: csv::Error) -> Self {
        PrivsenseError::Dataset(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrivsenseError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: PrivsenseError = io_err.into();
        assert!(matches!(err, PrivsenseError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: PrivsenseError = json_err.into();
        assert!(matches!(err, PrivsenseError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: PrivsenseError = toml_err.into();
        assert!(matches!(err, PrivsenseError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_implements_std_error() {
        let err = PrivsenseError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
