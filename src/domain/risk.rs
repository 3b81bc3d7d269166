//! Ordered risk level classification
//!
//! [`RiskLevel`] is the core ordinal of the whole crate: Low < Medium < High.
//! Every fusion and aggregation step combines levels with `max` over this
//! order, never by averaging across levels.

use serde::{Deserialize, Serialize};

/// Column sensitivity classification, ordered Low < Medium < High.
///
/// The derived `Ord` follows declaration order, so `a.max(b)` picks the
/// riskier of two levels. Serializes as the literal strings `"Low"`,
/// `"Medium"`, `"High"` consumed by downstream renderers and exporters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum RiskLevel {
    /// No recognized sensitive content
    #[default]
    Low,
    /// Quasi-identifiers (contact details, dates, coarse location)
    Medium,
    /// Regulated identifiers (card numbers, national IDs, email)
    High,
}

impl RiskLevel {
    /// All levels in ascending order
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Human-readable label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Scoring weight used for dataset-level aggregation (Low=1, Medium=2, High=3)
    pub fn weight(&self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Zero-based class index shared by the statistical classifiers
    pub fn class_index(&self) -> usize {
        *self as usize
    }

    /// Inverse of [`class_index`](Self::class_index); out-of-range indices clamp to High
    pub fn from_class_index(index: usize) -> Self {
        match index {
            0 => Self::Low,
            1 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Parse a risk label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
