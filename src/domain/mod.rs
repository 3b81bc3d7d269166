//! Domain models and types for privsense.
//!
//! This module contains the core domain models shared by every layer:
//!
//! - **Risk ordinal** ([`RiskLevel`]) with its total order Low < Medium < High
//! - **Tabular input** ([`Dataset`], [`Column`], [`ColumnSample`])
//! - **Verdict records** ([`ColumnVerdict`], [`RuleVerdict`], [`MlVerdict`])
//! - **Error types** ([`PrivsenseError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`]:
//!
//! ```rust
//! use privsense::domain::{PrivsenseError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = privsense::config::load_config("privsense.toml")?;
//!     let _ = config;
//!     Ok(())
//! }
//! ```

pub mod dataset;
pub mod errors;
pub mod result;
pub mod risk;
pub mod verdict;

// Re-export commonly used types for convenience
pub use dataset::{Column, ColumnSample, Dataset, DEFAULT_SAMPLE_SIZE};
pub use errors::PrivsenseError;
pub use result::Result;
pub use risk::RiskLevel;
pub use verdict::{
    ColumnVerdict, FusionMethod, HybridVerdict, MlVerdict, PrimaryFactor, RuleVerdict,
};
