//! Classification verdict records
//!
//! These are the immutable records produced once per classification pass
//! and consumed verbatim by renderers and exporters. Rule-only and hybrid
//! results are separate variants of [`ColumnVerdict`] so each mode's
//! required fields are statically guaranteed instead of living in one
//! loosely-typed record with optional keys.

use crate::classify::checksum::ChecksumKind;
use crate::domain::risk::RiskLevel;
use serde::{Deserialize, Serialize};

/// Which side of the statistical classifier determined the final verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryFactor {
    /// The column-name model won (or tied)
    ColumnName,
    /// The value-shape model won
    DataPattern,
}

/// Which method drove the fused verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionMethod {
    /// Rule-based verdict was strictly higher
    RuleBased,
    /// Statistical verdict was strictly higher
    MlEnhanced,
    /// Both methods agreed; the rule verdict is reported as the auditable one
    Consensus,
}

/// Result of the rule-based classifier for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleVerdict {
    /// Column name
    pub column: String,
    /// Risk implied by the column name keywords
    pub name_hint_risk: RiskLevel,
    /// Maximum risk observed over the sampled values
    pub value_sample_risk: RiskLevel,
    /// Final rule-based verdict: max(name, value), forced High on checksum hit
    pub final_risk: RiskLevel,
    /// True when a sampled value passed a checksum validator
    pub contains_card_or_sin: bool,
    /// Which checksum validator fired, when one did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_hit: Option<ChecksumKind>,
}

/// Result of the statistical classifier for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlVerdict {
    /// Risk predicted from the column name
    pub ml_name_risk: RiskLevel,
    /// Max class probability of the name prediction, in [0, 1]
    pub ml_name_confidence: f64,
    /// Risk predicted from the value-shape blob
    pub ml_data_risk: RiskLevel,
    /// Max class probability of the value prediction, in [0, 1]
    pub ml_data_confidence: f64,
    /// Higher of the two predicted levels
    pub ml_final_risk: RiskLevel,
    /// Confidence of the side that determined the final level
    pub ml_final_confidence: f64,
    /// Which side determined the final level
    pub ml_primary_factor: PrimaryFactor,
}

impl MlVerdict {
    /// The documented safe default: Low risk at 0.1 confidence.
    ///
    /// Returned (inside a degraded outcome) whenever the statistical
    /// classifier is unavailable, so classification always completes.
    pub fn safe_default() -> Self {
        Self {
            ml_name_risk: RiskLevel::Low,
            ml_name_confidence: 0.1,
            ml_data_risk: RiskLevel::Low,
            ml_data_confidence: 0.1,
            ml_final_risk: RiskLevel::Low,
            ml_final_confidence: 0.1,
            ml_primary_factor: PrimaryFactor::ColumnName,
        }
    }
}

/// Fused rule-based + statistical verdict for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridVerdict {
    /// Rule-based fields, flattened into the record
    #[serde(flatten)]
    pub rule: RuleVerdict,
    /// Statistical fields, flattened into the record
    #[serde(flatten)]
    pub ml: MlVerdict,
    /// Final fused verdict: max of the two methods under the risk order
    pub hybrid_final_risk: RiskLevel,
    /// Which method drove the fused verdict
    pub hybrid_method: FusionMethod,
    /// Statistical confidence, reported regardless of which method won.
    /// Documents model certainty, not a property of the rule engine.
    pub confidence_score: f64,
}

/// The per-column output of a classification pass.
///
/// Serializes untagged, so each variant's fields appear directly in the
/// record the downstream layers consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnVerdict {
    /// Full hybrid record (rule + statistical + fused fields)
    Hybrid(HybridVerdict),
    /// Rule-based-only record (statistical classifier skipped or degraded)
    RuleOnly(RuleVerdict),
}

impl ColumnVerdict {
    /// Column name
    pub fn column(&self) -> &str {
        match self {
            Self::Hybrid(v) => &v.rule.column,
            Self::RuleOnly(v) => &v.column,
        }
    }

    /// The verdict that dataset aggregation counts and scores
    pub fn final_risk(&self) -> RiskLevel {
        match self {
            Self::Hybrid(v) => v.hybrid_final_risk,
            Self::RuleOnly(v) => v.final_risk,
        }
    }

    /// Whether a checksum validator confirmed a card/ID number in the sample
    pub fn contains_card_or_sin(&self) -> bool {
        match self {
            Self::Hybrid(v) => v.rule.contains_card_or_sin,
            Self::RuleOnly(v) => v.contains_card_or_sin,
        }
    }

    /// Which checksum validator fired, when one did
    pub fn checksum_hit(&self) -> Option<ChecksumKind> {
        match self {
            Self::Hybrid(v) => v.rule.checksum_hit,
            Self::RuleOnly(v) => v.checksum_hit,
        }
    }
}
