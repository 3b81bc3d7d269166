//! Integration tests for the hybrid classification engine

use privsense::classify::{
    ClassificationEngine, ClassificationMode, RiskModel, RuleClassifier, TrainingCorpus,
};
use privsense::domain::{Column, ColumnVerdict, Dataset, RiskLevel};

fn customer_dataset() -> Dataset {
    Dataset::from_columns(vec![
        Column::from_values("ssn", ["123-45-6789", "987-65-4321"]),
        Column::from_values("email", ["alice@example.com", "bob@example.org"]),
        Column::from_values("city", ["Toronto", "Vancouver"]),
        Column::from_values("quantity", ["1", "2", "3"]),
    ])
}

#[test]
fn test_hybrid_pass_produces_one_verdict_per_column() {
    let engine = ClassificationEngine::new().unwrap();
    let verdicts = engine.classify_dataset(&customer_dataset());

    assert_eq!(verdicts.len(), 4);
    let names: Vec<&str> = verdicts.iter().map(|v| v.column()).collect();
    assert_eq!(names, vec!["ssn", "email", "city", "quantity"]);
}

#[test]
fn test_hybrid_final_is_max_of_rule_and_ml() {
    let engine = ClassificationEngine::new().unwrap();
    for verdict in engine.classify_dataset(&customer_dataset()) {
        match verdict {
            ColumnVerdict::Hybrid(v) => {
                assert_eq!(
                    v.hybrid_final_risk,
                    v.rule.final_risk.max(v.ml.ml_final_risk),
                    "column {}",
                    v.rule.column
                );
            }
            ColumnVerdict::RuleOnly(v) => {
                panic!("expected hybrid verdict for column {}", v.column)
            }
        }
    }
}

#[test]
fn test_hybrid_never_downgrades_a_rule_verdict() {
    let engine = ClassificationEngine::new().unwrap();
    let rules = RuleClassifier::new().unwrap();

    for column in customer_dataset().columns() {
        let sample = column.sample(200);
        let rule_risk = rules.classify_enhanced(&sample).final_risk;
        let hybrid = engine.classify_sample(&sample);
        assert!(
            hybrid.final_risk() >= rule_risk,
            "column {} downgraded from {} to {}",
            sample.name(),
            rule_risk,
            hybrid.final_risk()
        );
    }
}

#[test]
fn test_known_sensitive_column_is_high_in_hybrid() {
    let engine = ClassificationEngine::new().unwrap();
    let verdicts = engine.classify_dataset(&customer_dataset());
    assert_eq!(verdicts[0].final_risk(), RiskLevel::High);
}

#[test]
fn test_classification_is_repeatable() {
    let engine = ClassificationEngine::new().unwrap();
    let first = engine.classify_dataset(&customer_dataset());
    let second = engine.classify_dataset(&customer_dataset());
    assert_eq!(first, second);
}

#[test]
fn test_unavailable_model_falls_back_to_rules_for_whole_pass() {
    let rules = RuleClassifier::new().unwrap();
    let broken_model = RiskModel::with_corpus(TrainingCorpus {
        column_names: Vec::new(),
        value_patterns: Vec::new(),
    });
    let engine = ClassificationEngine::with_components(rules, broken_model)
        .mode(ClassificationMode::Hybrid);

    let verdicts = engine.classify_dataset(&customer_dataset());
    assert!(
        verdicts
            .iter()
            .all(|v| matches!(v, ColumnVerdict::RuleOnly(_))),
        "no record of a degraded pass should carry statistical fields"
    );
    // Rule semantics are intact in the fallback
    assert_eq!(verdicts[0].final_risk(), RiskLevel::High);
    assert_eq!(verdicts[3].final_risk(), RiskLevel::Low);
}

#[test]
fn test_hybrid_confidence_is_a_probability() {
    let engine = ClassificationEngine::new().unwrap();
    for verdict in engine.classify_dataset(&customer_dataset()) {
        if let ColumnVerdict::Hybrid(v) = verdict {
            assert!(
                (0.0..=1.0).contains(&v.confidence_score),
                "confidence {} out of range for column {}",
                v.confidence_score,
                v.rule.column
            );
        }
    }
}

#[test]
fn test_hybrid_record_serializes_flat() {
    let engine = ClassificationEngine::new().unwrap();
    let verdicts = engine.classify_dataset(&customer_dataset());
    let json = serde_json::to_value(&verdicts[0]).unwrap();

    for field in [
        "column",
        "name_hint_risk",
        "value_sample_risk",
        "final_risk",
        "contains_card_or_sin",
        "ml_name_risk",
        "ml_name_confidence",
        "ml_data_risk",
        "ml_data_confidence",
        "ml_final_risk",
        "ml_final_confidence",
        "ml_primary_factor",
        "hybrid_final_risk",
        "hybrid_method",
        "confidence_score",
    ] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
}

#[test]
fn test_empty_dataset_yields_no_verdicts() {
    let engine = ClassificationEngine::new().unwrap();
    let verdicts = engine.classify_dataset(&Dataset::from_columns(Vec::new()));
    assert!(verdicts.is_empty());
}
