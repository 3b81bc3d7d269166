//! Statistical column classifier
//!
//! Two text models trained once per process on the seed corpus: a
//! random forest over word n-grams of column names and a softmax
//! regression over char n-grams of sampled values. Training happens
//! lazily behind a [`std::sync::OnceLock`]; a failed attempt parks the
//! component in a terminal unavailable state and every later prediction
//! degrades to the documented safe default instead of retrying.

mod corpus;
mod forest;
mod linear;
mod vectorizer;

pub use corpus::TrainingCorpus;
pub use forest::{ForestParams, RandomForest};
pub use linear::{LinearParams, SoftmaxRegression};
pub use vectorizer::TfidfVectorizer;

use std::sync::OnceLock;

use crate::domain::{ColumnSample, MlVerdict, PrimaryFactor, Result, RiskLevel};

/// Cap on how many sampled values feed one prediction
const VALUE_BLOB_LIMIT: usize = 50;

/// Word n-gram vocabulary cap for the column-name model.
/// Large enough to keep every term of the seed corpus.
const NAME_MAX_FEATURES: usize = 200;

/// Char n-gram vocabulary cap for the value model
const VALUE_MAX_FEATURES: usize = 100;

/// Number of risk classes
const N_CLASSES: usize = RiskLevel::ALL.len();

/// The trained model pair
#[derive(Debug, Clone)]
struct TrainedModel {
    name_vectorizer: TfidfVectorizer,
    name_classifier: RandomForest,
    value_vectorizer: TfidfVectorizer,
    value_classifier: SoftmaxRegression,
}

impl TrainedModel {
    fn train(corpus: &TrainingCorpus) -> Result<Self> {
        corpus.validate()?;

        let (name_texts, name_classes) = TrainingCorpus::unzip(&corpus.column_names);
        let mut name_vectorizer = TfidfVectorizer::word(1, 2, NAME_MAX_FEATURES);
        name_vectorizer.fit(&name_texts)?;
        let name_rows: Vec<Vec<f64>> = name_texts
            .iter()
            .map(|t| name_vectorizer.transform(t))
            .collect();
        let name_classifier =
            RandomForest::fit(&name_rows, &name_classes, N_CLASSES, ForestParams::default());

        let (value_texts, value_classes) = TrainingCorpus::unzip(&corpus.value_patterns);
        let mut value_vectorizer = TfidfVectorizer::char_wb(2, 4, VALUE_MAX_FEATURES);
        value_vectorizer.fit(&value_texts)?;
        let value_rows: Vec<Vec<f64>> = value_texts
            .iter()
            .map(|t| value_vectorizer.transform(t))
            .collect();
        let value_classifier = SoftmaxRegression::fit(
            &value_rows,
            &value_classes,
            N_CLASSES,
            LinearParams::default(),
        );

        Ok(Self {
            name_vectorizer,
            name_classifier,
            value_vectorizer,
            value_classifier,
        })
    }

    fn predict_name(&self, column_name: &str) -> (RiskLevel, f64) {
        let features = self.name_vectorizer.transform(column_name);
        argmax(&self.name_classifier.predict_proba(&features))
    }

    fn predict_values(&self, values: &[String]) -> (RiskLevel, f64) {
        if values.is_empty() {
            return (RiskLevel::Low, 0.1);
        }
        let blob = values
            .iter()
            .take(VALUE_BLOB_LIMIT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        let features = self.value_vectorizer.transform(&blob);
        argmax(&self.value_classifier.predict_proba(&features))
    }
}

/// Pick the most probable risk level and its probability
fn argmax(probs: &[f64]) -> (RiskLevel, f64) {
    let mut best = (0, 0.0);
    for (idx, &p) in probs.iter().enumerate() {
        if p > best.1 {
            best = (idx, p);
        }
    }
    (RiskLevel::from_class_index(best.0), best.1)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Outcome of one statistical prediction request
#[derive(Debug, Clone, PartialEq)]
pub enum MlOutcome {
    /// The trained model produced this verdict
    Scored(MlVerdict),
    /// The model is unavailable; the verdict is the safe default
    Degraded { verdict: MlVerdict, reason: String },
}

impl MlOutcome {
    /// The verdict, regardless of how it was produced
    pub fn verdict(&self) -> &MlVerdict {
        match self {
            Self::Scored(v) => v,
            Self::Degraded { verdict, .. } => verdict,
        }
    }

    /// True when the trained model produced the verdict
    pub fn is_scored(&self) -> bool {
        matches!(self, Self::Scored(_))
    }
}

/// Terminal state of the lazily trained model
#[derive(Debug)]
enum ModelState {
    Ready(Box<TrainedModel>),
    Unavailable(String),
}

/// Operational metadata for diagnostics output
#[derive(Debug, Clone, serde::Serialize)]
pub struct ModelInfo {
    pub trained: bool,
    pub name_model: &'static str,
    pub value_model: &'static str,
    pub name_features: usize,
    pub value_features: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable_reason: Option<String>,
}

/// The statistical classifier component.
///
/// Cheap to construct; training is deferred to the first call that needs
/// the model and happens exactly once per instance.
pub struct RiskModel {
    state: OnceLock<ModelState>,
    corpus: TrainingCorpus,
}

impl RiskModel {
    /// A model backed by the built-in seed corpus
    pub fn new() -> Self {
        Self::with_corpus(TrainingCorpus::seed())
    }

    /// A model backed by a caller-supplied corpus
    pub fn with_corpus(corpus: TrainingCorpus) -> Self {
        Self {
            state: OnceLock::new(),
            corpus,
        }
    }

    fn state(&self) -> &ModelState {
        self.state.get_or_init(|| match TrainedModel::train(&self.corpus) {
            Ok(model) => {
                tracing::info!(
                    name_features = model.name_vectorizer.n_features(),
                    value_features = model.value_vectorizer.n_features(),
                    "risk model trained"
                );
                ModelState::Ready(Box::new(model))
            }
            Err(err) => {
                tracing::warn!(error = %err, "risk model training failed, predictions degrade to safe default");
                ModelState::Unavailable(err.to_string())
            }
        })
    }

    /// Trigger training now, reporting failure instead of deferring it
    pub fn ensure_trained(&self) -> Result<()> {
        match self.state() {
            ModelState::Ready(_) => Ok(()),
            ModelState::Unavailable(reason) => {
                Err(crate::domain::PrivsenseError::Model(reason.clone()))
            }
        }
    }

    /// True once training has failed; the state is terminal
    pub fn is_unavailable(&self) -> bool {
        matches!(self.state.get(), Some(ModelState::Unavailable(_)))
    }

    /// Classify one column sample.
    ///
    /// Always yields a verdict: when the model is unavailable the outcome
    /// is degraded and carries the safe default.
    pub fn classify(&self, sample: &ColumnSample) -> MlOutcome {
        let model = match self.state() {
            ModelState::Ready(model) => model,
            ModelState::Unavailable(reason) => {
                return MlOutcome::Degraded {
                    verdict: MlVerdict::safe_default(),
                    reason: reason.clone(),
                }
            }
        };

        let (name_risk, name_confidence) = model.predict_name(sample.name());
        let (data_risk, data_confidence) = model.predict_values(sample.values());

        // Higher level wins; on a tie the name side is the primary factor
        let (final_risk, final_confidence, primary_factor) = if data_risk > name_risk {
            (data_risk, data_confidence, PrimaryFactor::DataPattern)
        } else {
            (name_risk, name_confidence, PrimaryFactor::ColumnName)
        };

        MlOutcome::Scored(MlVerdict {
            ml_name_risk: name_risk,
            ml_name_confidence: round3(name_confidence),
            ml_data_risk: data_risk,
            ml_data_confidence: round3(data_confidence),
            ml_final_risk: final_risk,
            ml_final_confidence: round3(final_confidence),
            ml_primary_factor: primary_factor,
        })
    }

    /// Operational metadata, training the model if needed
    pub fn info(&self) -> ModelInfo {
        match self.state() {
            ModelState::Ready(model) => ModelInfo {
                trained: true,
                name_model: "random_forest",
                value_model: "softmax_regression",
                name_features: model.name_vectorizer.n_features(),
                value_features: model.value_vectorizer.n_features(),
                unavailable_reason: None,
            },
            ModelState::Unavailable(reason) => ModelInfo {
                trained: false,
                name_model: "random_forest",
                value_model: "softmax_regression",
                name_features: 0,
                value_features: 0,
                unavailable_reason: Some(reason.clone()),
            },
        }
    }
}

impl Default for RiskModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, values: &[&str]) -> ColumnSample {
        ColumnSample::new(name, values.iter().copied())
    }

    #[test]
    fn test_trains_on_seed_corpus() {
        let model = RiskModel::new();
        assert!(model.ensure_trained().is_ok());
        assert!(!model.is_unavailable());
    }

    #[test]
    fn test_known_high_risk_name_scores_high() {
        let model = RiskModel::new();
        let outcome = model.classify(&sample("ssn", &["123-45-6789"]));
        assert!(outcome.is_scored());
        let verdict = outcome.verdict();
        assert_eq!(verdict.ml_name_risk, RiskLevel::High);
        assert_eq!(verdict.ml_final_risk, RiskLevel::High);
    }

    #[test]
    fn test_known_low_risk_column_scores_low() {
        let model = RiskModel::new();
        let outcome = model.classify(&sample("quantity", &["100", "29.99"]));
        assert_eq!(outcome.verdict().ml_name_risk, RiskLevel::Low);
    }

    #[test]
    fn test_confidences_are_probabilities() {
        let model = RiskModel::new();
        let outcome = model.classify(&sample("email", &["user@domain.com"]));
        let v = outcome.verdict();
        for c in [v.ml_name_confidence, v.ml_data_confidence, v.ml_final_confidence] {
            assert!((0.0..=1.0).contains(&c), "confidence out of range: {c}");
        }
    }

    #[test]
    fn test_empty_values_use_low_default_for_data_side() {
        let model = RiskModel::new();
        let outcome = model.classify(&sample("notes", &[]));
        let v = outcome.verdict();
        assert_eq!(v.ml_data_risk, RiskLevel::Low);
        assert!((v.ml_data_confidence - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tie_reports_column_name_as_primary_factor() {
        let model = RiskModel::new();
        // Same training member on both sides: both predict High, name wins the tie
        let outcome = model.classify(&sample("ssn", &["123-45-6789"]));
        let v = outcome.verdict();
        if v.ml_name_risk == v.ml_data_risk {
            assert_eq!(v.ml_primary_factor, PrimaryFactor::ColumnName);
        }
    }

    #[test]
    fn test_bad_corpus_degrades_terminally() {
        let model = RiskModel::with_corpus(TrainingCorpus {
            column_names: Vec::new(),
            value_patterns: Vec::new(),
        });
        assert!(model.ensure_trained().is_err());
        assert!(model.is_unavailable());

        // Predictions still complete, carrying the safe default and a reason
        let outcome = model.classify(&sample("ssn", &["123-45-6789"]));
        match outcome {
            MlOutcome::Degraded { verdict, reason } => {
                assert_eq!(verdict, MlVerdict::safe_default());
                assert!(!reason.is_empty());
            }
            MlOutcome::Scored(_) => panic!("expected degraded outcome"),
        }
    }

    #[test]
    fn test_predictions_are_deterministic() {
        let model = RiskModel::new();
        let a = model.classify(&sample("phone_number", &["+1-555-123-4567"]));
        let b = model.classify(&sample("phone_number", &["+1-555-123-4567"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_info_reports_trained_model() {
        let model = RiskModel::new();
        let info = model.info();
        assert!(info.trained);
        assert!(info.name_features > 0);
        assert!(info.value_features > 0);
        assert!(info.unavailable_reason.is_none());
    }
}
