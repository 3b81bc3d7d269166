//! Rule-based column classifier
//!
//! Combines pattern-library matches on a column's name and a bounded
//! sample of its values into a Low/Medium/High verdict. The enhanced pass
//! additionally runs the checksum validators over the sample and forces
//! the verdict to High the moment one confirms a card or national-ID
//! number, recording which validator fired for downstream recommendation
//! text.

use crate::classify::checksum;
use crate::classify::patterns::PatternRegistry;
use crate::domain::dataset::ColumnSample;
use crate::domain::result::Result;
use crate::domain::risk::RiskLevel;
use crate::domain::verdict::RuleVerdict;
use std::sync::Arc;

/// Rule-based classifier backed by a [`PatternRegistry`]
pub struct RuleClassifier {
    registry: Arc<PatternRegistry>,
}

impl RuleClassifier {
    /// Create a classifier with the built-in pattern library
    pub fn new() -> Result<Self> {
        Ok(Self {
            registry: Arc::new(PatternRegistry::builtin()?),
        })
    }

    /// Create a classifier with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The backing pattern registry
    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Classify one column from its name and value sample.
    ///
    /// The value scan tracks the running maximum risk and short-circuits
    /// as soon as High is reached; the final verdict is the max of the
    /// name risk and the value risk. Empty samples classify Low.
    pub fn classify(&self, sample: &ColumnSample) -> RuleVerdict {
        let name_hint_risk = self.registry.classify_name(sample.name());
        let value_sample_risk = self.scan_values(sample.values());

        RuleVerdict {
            column: sample.name().to_string(),
            name_hint_risk,
            value_sample_risk,
            final_risk: name_hint_risk.max(value_sample_risk),
            contains_card_or_sin: false,
            checksum_hit: None,
        }
    }

    /// Classify with the additional checksum escalation step.
    ///
    /// Scans the sample for values whose digits pass either checksum
    /// validator; on the first hit the final verdict is forced to High
    /// regardless of the name and shape risks, and the verdict records
    /// which validator fired.
    pub fn classify_enhanced(&self, sample: &ColumnSample) -> RuleVerdict {
        let mut verdict = self.classify(sample);

        let checksum_hit = sample.values().iter().find_map(|v| checksum::detect(v));
        if let Some(kind) = checksum_hit {
            tracing::debug!(
                column = sample.name(),
                validator = ?kind,
                "Checksum validator confirmed identifier, escalating to High"
            );
            verdict.contains_card_or_sin = true;
            verdict.checksum_hit = Some(kind);
            verdict.final_risk = RiskLevel::High;
        }

        verdict
    }

    /// Running-max scan over the sampled values, short-circuiting at High
    fn scan_values(&self, values: &[String]) -> RiskLevel {
        let mut risk = RiskLevel::Low;
        for value in values {
            risk = risk.max(self.registry.classify_value(value));
            if risk == RiskLevel::High {
                break;
            }
        }
        risk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> RuleClassifier {
        RuleClassifier::new().unwrap()
    }

    #[test]
    fn test_ssn_name_is_high_regardless_of_values() {
        let sample = ColumnSample::new("ssn", ["hello", "world"]);
        let verdict = classifier().classify(&sample);

        assert_eq!(verdict.name_hint_risk, RiskLevel::High);
        assert_eq!(verdict.final_risk, RiskLevel::High);
    }

    #[test]
    fn test_plain_id_column_is_low() {
        let sample = ColumnSample::new("id", ["CUST001", "CUST002"]);
        let verdict = classifier().classify(&sample);

        assert_eq!(verdict.name_hint_risk, RiskLevel::Low);
        assert_eq!(verdict.value_sample_risk, RiskLevel::Low);
        assert_eq!(verdict.final_risk, RiskLevel::Low);
    }

    #[test]
    fn test_final_is_max_of_name_and_values() {
        // Low name, email values -> High by value
        let sample = ColumnSample::new("contact", ["a@example.com"]);
        let verdict = classifier().classify(&sample);
        assert_eq!(verdict.name_hint_risk, RiskLevel::Low);
        assert_eq!(verdict.value_sample_risk, RiskLevel::High);
        assert_eq!(verdict.final_risk, RiskLevel::High);

        // Medium name, low values -> Medium overall
        let sample = ColumnSample::new("city", ["Toronto", "Montreal"]);
        let verdict = classifier().classify(&sample);
        assert_eq!(verdict.name_hint_risk, RiskLevel::Medium);
        assert_eq!(verdict.final_risk, RiskLevel::Medium);
    }

    #[test]
    fn test_empty_sample_classifies_low() {
        let sample = ColumnSample::new("notes", Vec::<String>::new());
        let verdict = classifier().classify(&sample);
        assert_eq!(verdict.final_risk, RiskLevel::Low);
    }

    #[test]
    fn test_enhanced_escalates_on_luhn_hit() {
        let sample = ColumnSample::new("reference", ["x", "4539148803436467", "y"]);
        let verdict = classifier().classify_enhanced(&sample);

        assert!(verdict.contains_card_or_sin);
        assert_eq!(
            verdict.checksum_hit,
            Some(checksum::ChecksumKind::CardNumber)
        );
        assert_eq!(verdict.final_risk, RiskLevel::High);
    }

    #[test]
    fn test_enhanced_escalates_on_sin_hit() {
        let sample = ColumnSample::new("misc", ["046-454-286"]);
        let verdict = classifier().classify_enhanced(&sample);

        assert!(verdict.contains_card_or_sin);
        assert_eq!(verdict.checksum_hit, Some(checksum::ChecksumKind::Sin));
        assert_eq!(verdict.final_risk, RiskLevel::High);
    }

    #[test]
    fn test_enhanced_without_hit_matches_basic() {
        let sample = ColumnSample::new("city", ["Toronto"]);
        let basic = classifier().classify(&sample);
        let enhanced = classifier().classify_enhanced(&sample);

        assert_eq!(basic, enhanced);
        assert!(!enhanced.contains_card_or_sin);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let sample = ColumnSample::new("email", ["a@example.com", "b@example.com"]);
        let classifier = classifier();
        assert_eq!(
            classifier.classify_enhanced(&sample),
            classifier.classify_enhanced(&sample)
        );
    }
}
