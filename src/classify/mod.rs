//! Column risk classification
//!
//! The classification pipeline: a TOML-driven pattern library, checksum
//! validators for card and SIN values, the rule-based classifier, the
//! statistical classifier, and the engine that fuses them into per-column
//! verdicts and dataset reports.

pub mod checksum;
pub mod engine;
pub mod model;
pub mod patterns;
pub mod report;
pub mod rules;

pub use checksum::ChecksumKind;
pub use engine::{ClassificationEngine, ClassificationMode};
pub use model::{MlOutcome, ModelInfo, RiskModel, TrainingCorpus};
pub use patterns::PatternRegistry;
pub use report::{generate_recommendations, DatasetSummary, RiskReport};
pub use rules::RuleClassifier;
