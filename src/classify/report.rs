//! Risk report assembly and rendering
//!
//! Aggregates per-column verdicts into a dataset summary with a numeric
//! risk score and actionable recommendations, and renders the result for
//! the console or as JSON.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ColumnVerdict, PrivsenseError, Result, RiskLevel};

/// Dataset-level aggregation of a classification pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Number of columns classified
    pub total_columns: usize,
    /// Columns whose final verdict was High
    pub high_risk_columns: usize,
    /// Columns whose final verdict was Medium
    pub medium_risk_columns: usize,
    /// Columns whose final verdict was Low
    pub low_risk_columns: usize,
    /// Sum of per-column weights (Low 1, Medium 2, High 3)
    pub score: u32,
    /// Maximum possible score, 3 per column
    pub max_score: u32,
    /// Score as a percentage of the maximum, 0.0 for an empty dataset
    pub percentage: f64,
}

impl DatasetSummary {
    /// Aggregate a set of column verdicts
    pub fn from_verdicts(verdicts: &[ColumnVerdict]) -> Self {
        let mut counts = [0usize; RiskLevel::ALL.len()];
        let mut score = 0u32;
        for verdict in verdicts {
            let level = verdict.final_risk();
            counts[level.class_index()] += 1;
            score += level.weight();
        }
        let max_score = 3 * verdicts.len() as u32;
        let percentage = if max_score > 0 {
            f64::from(score) / f64::from(max_score) * 100.0
        } else {
            0.0
        };

        Self {
            total_columns: verdicts.len(),
            high_risk_columns: counts[RiskLevel::High.class_index()],
            medium_risk_columns: counts[RiskLevel::Medium.class_index()],
            low_risk_columns: counts[RiskLevel::Low.class_index()],
            score,
            max_score,
            percentage,
        }
    }

    /// The dominant risk level for headline display
    pub fn overall_risk(&self) -> RiskLevel {
        if self.high_risk_columns > 0 {
            RiskLevel::High
        } else if self.medium_risk_columns > 0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Per-column remediation advice derived from the verdicts.
///
/// High-risk columns with a confirmed card or SIN get the strongest
/// wording; unflagged High and all Medium columns get level-appropriate
/// advice; a dataset with neither gets a single low-risk note.
pub fn generate_recommendations(verdicts: &[ColumnVerdict]) -> Vec<String> {
    let mut recs = Vec::new();
    for verdict in verdicts {
        let column = verdict.column();
        match verdict.final_risk() {
            RiskLevel::High => {
                if verdict.contains_card_or_sin() {
                    recs.push(format!(
                        "Column '{column}' appears to contain credit card numbers or SINs. \
                         Consider hashing or tokenising this data and limiting access."
                    ));
                } else {
                    recs.push(format!(
                        "Column '{column}' contains highly sensitive data. Ensure strong \
                         encryption, role-based access control and audit logging."
                    ));
                }
            }
            RiskLevel::Medium => {
                recs.push(format!(
                    "Column '{column}' contains moderately sensitive data. Review retention \
                     periods and apply appropriate pseudonymisation techniques."
                ));
            }
            RiskLevel::Low => {}
        }
    }
    if recs.is_empty() {
        recs.push(
            "Dataset appears low risk. Continue to monitor and apply basic safeguards."
                .to_string(),
        );
    }
    recs
}

/// A complete classification report for one dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    /// Name of the assessed dataset (usually the input file name)
    pub dataset: String,
    /// When the assessment ran
    pub generated_at: DateTime<Utc>,
    /// Dataset-level aggregation
    pub summary: DatasetSummary,
    /// One verdict per column, in dataset order
    pub columns: Vec<ColumnVerdict>,
    /// Remediation advice derived from the verdicts
    pub recommendations: Vec<String>,
}

impl RiskReport {
    /// Assemble a report from a finished classification pass
    pub fn new(dataset: impl Into<String>, verdicts: Vec<ColumnVerdict>) -> Self {
        let summary = DatasetSummary::from_verdicts(&verdicts);
        let recommendations = generate_recommendations(&verdicts);
        Self {
            dataset: dataset.into(),
            generated_at: Utc::now(),
            summary,
            columns: verdicts,
            recommendations,
        }
    }

    /// Render the report for terminal output
    pub fn format_console(&self) -> String {
        let mut out = String::new();
        let s = &self.summary;

        let _ = writeln!(out, "Privacy Risk Report: {}", self.dataset);
        let _ = writeln!(out, "{}", "=".repeat(60));
        let _ = writeln!(
            out,
            "Overall risk: {} (score {}/{}, {:.1}%)",
            s.overall_risk(),
            s.score,
            s.max_score,
            s.percentage
        );
        let _ = writeln!(
            out,
            "Columns: {} total, {} high, {} medium, {} low",
            s.total_columns, s.high_risk_columns, s.medium_risk_columns, s.low_risk_columns
        );
        let _ = writeln!(out);

        for verdict in &self.columns {
            match verdict {
                ColumnVerdict::Hybrid(v) => {
                    let _ = writeln!(
                        out,
                        "  [{}] {} (rule {}, ml {} @ {:.3}, {})",
                        v.hybrid_final_risk,
                        v.rule.column,
                        v.rule.final_risk,
                        v.ml.ml_final_risk,
                        v.confidence_score,
                        match v.hybrid_method {
                            crate::domain::FusionMethod::RuleBased => "rule_based",
                            crate::domain::FusionMethod::MlEnhanced => "ml_enhanced",
                            crate::domain::FusionMethod::Consensus => "consensus",
                        }
                    );
                }
                ColumnVerdict::RuleOnly(v) => {
                    let _ = writeln!(out, "  [{}] {}", v.final_risk, v.column);
                }
            }
            if let Some(kind) = verdict.checksum_hit() {
                let _ = writeln!(out, "        checksum match: {}", kind.label());
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Recommendations:");
        for rec in &self.recommendations {
            let _ = writeln!(out, "  - {rec}");
        }
        out
    }

    /// Render the report as pretty-printed JSON
    pub fn format_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PrivsenseError::Report(format!("failed to serialize report: {e}")))
    }

    /// Write the JSON rendering to a file
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.format_json()?;
        std::fs::write(path, json).map_err(|e| {
            PrivsenseError::Report(format!("failed to write report to {}: {e}", path.display()))
        })?;
        tracing::info!(path = %path.display(), "risk report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RuleVerdict;

    fn rule_only(column: &str, level: RiskLevel, card_or_sin: bool) -> ColumnVerdict {
        ColumnVerdict::RuleOnly(RuleVerdict {
            column: column.to_string(),
            name_hint_risk: level,
            value_sample_risk: level,
            final_risk: level,
            contains_card_or_sin: card_or_sin,
            checksum_hit: None,
        })
    }

    #[test]
    fn test_score_counts_one_column_per_level() {
        let verdicts = vec![
            rule_only("ssn", RiskLevel::High, false),
            rule_only("email", RiskLevel::Medium, false),
            rule_only("quantity", RiskLevel::Low, false),
        ];
        let summary = DatasetSummary::from_verdicts(&verdicts);

        assert_eq!(summary.total_columns, 3);
        assert_eq!(summary.high_risk_columns, 1);
        assert_eq!(summary.medium_risk_columns, 1);
        assert_eq!(summary.low_risk_columns, 1);
        assert_eq!(summary.score, 6);
        assert_eq!(summary.max_score, 9);
        assert!((summary.percentage - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_empty_dataset_scores_zero() {
        let summary = DatasetSummary::from_verdicts(&[]);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.max_score, 0);
        assert_eq!(summary.percentage, 0.0);
        assert_eq!(summary.overall_risk(), RiskLevel::Low);
    }

    #[test]
    fn test_overall_risk_prefers_highest_present() {
        let verdicts = vec![
            rule_only("email", RiskLevel::Medium, false),
            rule_only("quantity", RiskLevel::Low, false),
        ];
        let summary = DatasetSummary::from_verdicts(&verdicts);
        assert_eq!(summary.overall_risk(), RiskLevel::Medium);
    }

    #[test]
    fn test_card_or_sin_recommendation_wording() {
        let verdicts = vec![rule_only("card_number", RiskLevel::High, true)];
        let recs = generate_recommendations(&verdicts);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("credit card numbers or SINs"));
        assert!(recs[0].contains("card_number"));
    }

    #[test]
    fn test_high_without_checksum_gets_encryption_advice() {
        let verdicts = vec![rule_only("diagnosis", RiskLevel::High, false)];
        let recs = generate_recommendations(&verdicts);
        assert!(recs[0].contains("highly sensitive data"));
    }

    #[test]
    fn test_all_low_dataset_gets_single_monitoring_note() {
        let verdicts = vec![
            rule_only("id", RiskLevel::Low, false),
            rule_only("quantity", RiskLevel::Low, false),
        ];
        let recs = generate_recommendations(&verdicts);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("low risk"));
    }

    #[test]
    fn test_console_rendering_mentions_every_column() {
        let verdicts = vec![
            rule_only("ssn", RiskLevel::High, false),
            rule_only("quantity", RiskLevel::Low, false),
        ];
        let report = RiskReport::new("people.csv", verdicts);
        let text = report.format_console();
        assert!(text.contains("people.csv"));
        assert!(text.contains("ssn"));
        assert!(text.contains("quantity"));
        assert!(text.contains("Recommendations:"));
    }

    #[test]
    fn test_json_rendering_round_trips() {
        let report = RiskReport::new(
            "people.csv",
            vec![rule_only("email", RiskLevel::Medium, false)],
        );
        let json = report.format_json().unwrap();
        let parsed: RiskReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.summary, report.summary);
        assert_eq!(parsed.columns, report.columns);
    }
}
