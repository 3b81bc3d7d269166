//! Multinomial logistic regression
//!
//! Softmax regression trained with full-batch gradient descent. Used as
//! the value-content classifier, where the char n-gram features are
//! dense enough that a linear model generalizes better than trees.

/// A fitted softmax regression model
#[derive(Debug, Clone)]
pub struct SoftmaxRegression {
    /// Per-class weight vectors, one row per class
    weights: Vec<Vec<f64>>,
    /// Per-class intercepts
    intercepts: Vec<f64>,
    n_classes: usize,
}

/// Training parameters for [`SoftmaxRegression`]
#[derive(Debug, Clone, Copy)]
pub struct LinearParams {
    /// Gradient descent step size
    pub learning_rate: f64,
    /// Number of full-batch epochs
    pub epochs: usize,
    /// L2 regularization strength
    pub l2: f64,
}

impl Default for LinearParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            epochs: 500,
            l2: 1e-4,
        }
    }
}

impl SoftmaxRegression {
    /// Fit on `x` (rows of equal-length feature vectors) against class
    /// indices `y` in `0..n_classes`.
    pub fn fit(x: &[Vec<f64>], y: &[usize], n_classes: usize, params: LinearParams) -> Self {
        debug_assert_eq!(x.len(), y.len());
        let n_samples = x.len().max(1);
        let n_features = x.first().map(Vec::len).unwrap_or(0);

        let mut weights = vec![vec![0.0; n_features]; n_classes];
        let mut intercepts = vec![0.0; n_classes];

        for _ in 0..params.epochs {
            let mut grad_w = vec![vec![0.0; n_features]; n_classes];
            let mut grad_b = vec![0.0; n_classes];

            for (row, &label) in x.iter().zip(y) {
                let probs = softmax(&logits(row, &weights, &intercepts));
                for class in 0..n_classes {
                    let err = probs[class] - if class == label { 1.0 } else { 0.0 };
                    for (g, &v) in grad_w[class].iter_mut().zip(row) {
                        *g += err * v;
                    }
                    grad_b[class] += err;
                }
            }

            let scale = params.learning_rate / n_samples as f64;
            for class in 0..n_classes {
                for (w, g) in weights[class].iter_mut().zip(&grad_w[class]) {
                    *w -= scale * g + params.learning_rate * params.l2 * *w;
                }
                intercepts[class] -= scale * grad_b[class];
            }
        }

        Self {
            weights,
            intercepts,
            n_classes,
        }
    }

    /// Class probabilities for one feature vector
    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        softmax(&logits(features, &self.weights, &self.intercepts))
    }

    /// Number of classes the model was fit on
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}

fn logits(features: &[f64], weights: &[Vec<f64>], intercepts: &[f64]) -> Vec<f64> {
    weights
        .iter()
        .zip(intercepts)
        .map(|(w, b)| {
            b + w
                .iter()
                .zip(features.iter().chain(std::iter::repeat(&0.0)))
                .map(|(wi, xi)| wi * xi)
                .sum::<f64>()
        })
        .collect()
}

/// Numerically stable softmax
fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&z| (z - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    if sum == 0.0 {
        return vec![1.0 / logits.len().max(1) as f64; logits.len()];
    }
    exps.iter().map(|&e| e / sum).collect()
}
