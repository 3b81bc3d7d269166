//! Configuration management.
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use privsense::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("privsense.toml")?;
//! println!("Mode: {}", config.classify.mode);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [classify]
//! mode = "hybrid"
//! sample_size = 200
//!
//! [logging]
//! local_enabled = false
//! ```
//!
//! Every key can also be overridden through `PRIVSENSE_<SECTION>_<KEY>`
//! environment variables, and values in the file may reference the
//! environment with `${VAR_NAME}` substitution.

pub mod loader;
pub mod schema;

pub use loader::{default_config_template, load_config, load_config_or_default};
pub use schema::{ApplicationConfig, ClassifyConfig, LoggingConfig, PrivsenseConfig};
