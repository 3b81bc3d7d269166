//! Structured logging for privsense.
//!
//! Tracing-based logging with a console layer and optional rotating
//! JSON file output, configured through [`crate::config::LoggingConfig`].

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
