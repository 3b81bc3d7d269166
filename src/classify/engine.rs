//! Dataset classification engine
//!
//! Drives one pass over a dataset: sample each column, run the rule
//! classifier, optionally run the statistical classifier, and fuse the
//! two verdicts per column. The engine decides once per dataset whether
//! the statistical path is usable; when it is not, the whole pass runs
//! rule-only so a report never mixes hybrid and degraded records.

use std::sync::Arc;

use crate::classify::model::{MlOutcome, RiskModel};
use crate::classify::rules::RuleClassifier;
use crate::domain::{
    ColumnVerdict, Dataset, FusionMethod, HybridVerdict, MlVerdict, Result, RuleVerdict,
    DEFAULT_SAMPLE_SIZE,
};

/// How much of the pipeline a classification pass runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMode {
    /// Pattern and keyword rules only
    RuleOnly,
    /// Rules plus checksum escalation
    Enhanced,
    /// Enhanced rules fused with the statistical classifier
    Hybrid,
}

impl Default for ClassificationMode {
    fn default() -> Self {
        Self::Hybrid
    }
}

impl ClassificationMode {
    /// Parse a mode name as it appears in config files and CLI flags
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rule_only" | "rules" => Some(Self::RuleOnly),
            "enhanced" => Some(Self::Enhanced),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClassificationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::RuleOnly => "rule_only",
            Self::Enhanced => "enhanced",
            Self::Hybrid => "hybrid",
        };
        f.write_str(label)
    }
}

/// The classification engine, cheap to clone across callers
#[derive(Clone)]
pub struct ClassificationEngine {
    rules: Arc<RuleClassifier>,
    model: Arc<RiskModel>,
    sample_size: usize,
    mode: ClassificationMode,
}

impl ClassificationEngine {
    /// An engine over the built-in pattern registry and seed corpus
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: Arc::new(RuleClassifier::new()?),
            model: Arc::new(RiskModel::new()),
            sample_size: DEFAULT_SAMPLE_SIZE,
            mode: ClassificationMode::default(),
        })
    }

    /// An engine assembled from caller-supplied components
    pub fn with_components(rules: RuleClassifier, model: RiskModel) -> Self {
        Self {
            rules: Arc::new(rules),
            model: Arc::new(model),
            sample_size: DEFAULT_SAMPLE_SIZE,
            mode: ClassificationMode::default(),
        }
    }

    /// Set how many values are sampled per column
    pub fn sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size.max(1);
        self
    }

    /// Set the classification mode
    pub fn mode(mut self, mode: ClassificationMode) -> Self {
        self.mode = mode;
        self
    }

    /// The mode this engine runs in
    pub fn current_mode(&self) -> ClassificationMode {
        self.mode
    }

    /// The statistical classifier backing the hybrid mode
    pub fn model(&self) -> &RiskModel {
        &self.model
    }

    /// Classify every column of a dataset.
    ///
    /// In hybrid mode the statistical model trains on first use here; if
    /// training fails the whole pass falls back to enhanced rules and the
    /// fallback is logged once, not once per column.
    pub fn classify_dataset(&self, dataset: &Dataset) -> Vec<ColumnVerdict> {
        let mode = self.effective_mode();

        dataset
            .columns()
            .iter()
            .map(|column| {
                let sample = column.sample(self.sample_size);
                match mode {
                    ClassificationMode::RuleOnly => {
                        ColumnVerdict::RuleOnly(self.rules.classify(&sample))
                    }
                    ClassificationMode::Enhanced => {
                        ColumnVerdict::RuleOnly(self.rules.classify_enhanced(&sample))
                    }
                    ClassificationMode::Hybrid => {
                        let rule = self.rules.classify_enhanced(&sample);
                        match self.model.classify(&sample) {
                            MlOutcome::Scored(ml) => ColumnVerdict::Hybrid(fuse(rule, ml)),
                            // Unreachable after effective_mode() checked training,
                            // but a degraded outcome still yields a usable record
                            MlOutcome::Degraded { .. } => ColumnVerdict::RuleOnly(rule),
                        }
                    }
                }
            })
            .collect()
    }

    /// Classify a single already-sampled column in this engine's mode
    pub fn classify_sample(&self, sample: &crate::domain::ColumnSample) -> ColumnVerdict {
        match self.effective_mode() {
            ClassificationMode::RuleOnly => ColumnVerdict::RuleOnly(self.rules.classify(sample)),
            ClassificationMode::Enhanced => {
                ColumnVerdict::RuleOnly(self.rules.classify_enhanced(sample))
            }
            ClassificationMode::Hybrid => {
                let rule = self.rules.classify_enhanced(sample);
                match self.model.classify(sample) {
                    MlOutcome::Scored(ml) => ColumnVerdict::Hybrid(fuse(rule, ml)),
                    MlOutcome::Degraded { .. } => ColumnVerdict::RuleOnly(rule),
                }
            }
        }
    }

    /// The mode the pass will actually run in, demoting hybrid to
    /// enhanced when the statistical model cannot train.
    fn effective_mode(&self) -> ClassificationMode {
        if self.mode == ClassificationMode::Hybrid && self.model.ensure_trained().is_err() {
            tracing::warn!("statistical model unavailable, classifying with enhanced rules only");
            return ClassificationMode::Enhanced;
        }
        self.mode
    }
}

/// Fuse one column's rule and statistical verdicts.
///
/// The fused level is the maximum of the two under the risk order. The
/// method records which side was strictly higher; equal levels are a
/// consensus. The confidence score always reports the statistical
/// model's certainty.
fn fuse(rule: RuleVerdict, ml: MlVerdict) -> HybridVerdict {
    let hybrid_final_risk = rule.final_risk.max(ml.ml_final_risk);
    let hybrid_method = match ml.ml_final_risk.cmp(&rule.final_risk) {
        std::cmp::Ordering::Greater => FusionMethod::MlEnhanced,
        std::cmp::Ordering::Less => FusionMethod::RuleBased,
        std::cmp::Ordering::Equal => FusionMethod::Consensus,
    };
    let confidence_score = ml.ml_final_confidence;

    HybridVerdict {
        rule,
        ml,
        hybrid_final_risk,
        hybrid_method,
        confidence_score,
    }
}
