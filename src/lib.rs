// privsense - Privacy Risk Assessment for Tabular Datasets
// Copyright (c) 2025 privsense Contributors
// Licensed under the MIT License

//! # privsense - Privacy Risk Assessment for Tabular Datasets
//!
//! privsense classifies the privacy risk of tabular data, column by
//! column, into an ordered Low / Medium / High scale and aggregates the
//! verdicts into a dataset risk score with remediation recommendations.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Rule-based classification** from column-name keywords and value
//!   shape patterns loaded from a TOML pattern library
//! - **Checksum validation** (Luhn for payment cards, the SIN check for
//!   Canadian social insurance numbers) to confirm high-risk identifiers
//! - **Statistical classification** with text models trained once per
//!   process on a labeled seed corpus
//! - **Fusion** of both methods into per-column hybrid verdicts and a
//!   dataset-level report
//!
//! ## Architecture
//!
//! privsense follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`classify`] - Classification pipeline (patterns, checksums, rules,
//!   statistical models, fusion engine, reporting)
//! - [`domain`] - Core domain types (risk levels, datasets, verdicts)
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use privsense::classify::{ClassificationEngine, RiskReport};
//! use privsense::domain::Dataset;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Dataset::from_csv_path("customers.csv")?;
//!
//!     let engine = ClassificationEngine::new()?;
//!     let verdicts = engine.classify_dataset(&dataset);
//!
//!     let report = RiskReport::new("customers.csv", verdicts);
//!     println!("{}", report.format_console());
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
