//! Random forest classifier
//!
//! A small tree ensemble over dense feature vectors: bootstrap-sampled
//! gini trees with per-split feature subsampling, averaged into class
//! probabilities. All randomness comes from a caller-supplied seed, so
//! training the same corpus always yields the same model.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// One node of a fitted decision tree, stored in an arena
#[derive(Debug, Clone)]
enum TreeNode {
    /// Terminal node holding class probabilities
    Leaf { probs: Vec<f64> },
    /// Binary split on `feature < threshold`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A single fitted decision tree
#[derive(Debug, Clone)]
struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn predict_proba(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { probs } => return probs,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    idx = if value < *threshold { *left } else { *right };
                }
            }
        }
    }
}

/// Forest training parameters
#[derive(Debug, Clone, Copy)]
pub struct ForestParams {
    /// Number of trees in the ensemble
    pub n_trees: usize,
    /// Maximum tree depth
    pub max_depth: usize,
    /// RNG seed for bootstrap and feature subsampling
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 50,
            max_depth: 10,
            seed: 42,
        }
    }
}

/// A fitted random forest over dense feature vectors
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    /// Fit a forest on `x` (rows of equal-length feature vectors) against
    /// class indices `y` in `0..n_classes`.
    pub fn fit(x: &[Vec<f64>], y: &[usize], n_classes: usize, params: ForestParams) -> Self {
        debug_assert_eq!(x.len(), y.len());
        let n_samples = x.len();
        let n_features = x.first().map(Vec::len).unwrap_or(0);
        // Classic sqrt(p) feature subsampling
        let features_per_split = ((n_features as f64).sqrt().ceil() as usize).max(1);

        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.n_trees);

        for _ in 0..params.n_trees {
            let bootstrap: Vec<usize> =
                (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();

            let mut builder = TreeBuilder {
                x,
                y,
                n_classes,
                n_features,
                features_per_split,
                max_depth: params.max_depth,
                nodes: Vec::new(),
            };
            builder.grow(&bootstrap, 0, &mut rng);
            trees.push(DecisionTree {
                nodes: builder.nodes,
            });
        }

        Self { trees, n_classes }
    }

    /// Average class probabilities across all trees
    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let mut probs = vec![0.0; self.n_classes];
        if self.trees.is_empty() {
            return probs;
        }
        for tree in &self.trees {
            for (acc, p) in probs.iter_mut().zip(tree.predict_proba(features)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        for p in &mut probs {
            *p /= n;
        }
        probs
    }

    /// Number of trees in the fitted ensemble
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

/// Recursive CART-style builder for one tree
struct TreeBuilder<'a> {
    x: &'a [Vec<f64>],
    y: &'a [usize],
    n_classes: usize,
    n_features: usize,
    features_per_split: usize,
    max_depth: usize,
    nodes: Vec<TreeNode>,
}

impl TreeBuilder<'_> {
    /// Grow a subtree over `indices`, returning its node index
    fn grow(&mut self, indices: &[usize], depth: usize, rng: &mut StdRng) -> usize {
        let counts = self.class_counts(indices);
        let is_pure = counts.iter().filter(|&&c| c > 0).count() <= 1;

        if depth >= self.max_depth || indices.len() < 2 || is_pure {
            return self.push_leaf(&counts);
        }

        match self.best_split(indices, rng) {
            Some((feature, threshold, left_idx, right_idx)) => {
                let node = self.nodes.len();
                // Reserve the slot before recursing so child indices are final
                self.nodes.push(TreeNode::Leaf { probs: Vec::new() });
                let left = self.grow(&left_idx, depth + 1, rng);
                let right = self.grow(&right_idx, depth + 1, rng);
                self.nodes[node] = TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                };
                node
            }
            None => self.push_leaf(&counts),
        }
    }

    fn push_leaf(&mut self, counts: &[usize]) -> usize {
        let total: usize = counts.iter().sum();
        let probs = if total == 0 {
            vec![1.0 / self.n_classes as f64; self.n_classes]
        } else {
            counts
                .iter()
                .map(|&c| c as f64 / total as f64)
                .collect()
        };
        self.nodes.push(TreeNode::Leaf { probs });
        self.nodes.len() - 1
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes];
        for &i in indices {
            counts[self.y[i]] += 1;
        }
        counts
    }

    fn gini(&self, counts: &[usize]) -> f64 {
        let total: usize = counts.iter().sum();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        1.0 - counts
            .iter()
            .map(|&c| {
                let p = c as f64 / total;
                p * p
            })
            .sum::<f64>()
    }

    /// Find the best gini split over a random feature subset.
    ///
    /// Candidate thresholds are midpoints between consecutive distinct
    /// values of each candidate feature. Returns None when no split
    /// separates the samples.
    #[allow(clippy::type_complexity)]
    fn best_split(
        &self,
        indices: &[usize],
        rng: &mut StdRng,
    ) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
        let mut candidates: Vec<usize> = (0..self.n_features).collect();
        candidates.shuffle(rng);
        candidates.truncate(self.features_per_split);

        let parent_gini = self.gini(&self.class_counts(indices));
        let mut best: Option<(f64, usize, f64)> = None;

        for &feature in &candidates {
            let mut values: Vec<f64> = indices.iter().map(|&i| self.x[i][feature]).collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            values.dedup();
            if values.len() < 2 {
                continue;
            }

            for pair in values.windows(2) {
                let threshold = (pair[0] + pair[1]) / 2.0;
                let mut left_counts = vec![0; self.n_classes];
                let mut right_counts = vec![0; self.n_classes];
                for &i in indices {
                    if self.x[i][feature] < threshold {
                        left_counts[self.y[i]] += 1;
                    } else {
                        right_counts[self.y[i]] += 1;
                    }
                }
                let n_left: usize = left_counts.iter().sum();
                let n_right: usize = right_counts.iter().sum();
                if n_left == 0 || n_right == 0 {
                    continue;
                }

                let n = indices.len() as f64;
                let weighted = (n_left as f64 / n) * self.gini(&left_counts)
                    + (n_right as f64 / n) * self.gini(&right_counts);

                if weighted < parent_gini
                    && best.map_or(true, |(score, _, _)| weighted < score)
                {
                    best = Some((weighted, feature, threshold));
                }
            }
        }

        best.map(|(_, feature, threshold)| {
            let (left, right): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .partition(|&&i| self.x[i][feature] < threshold);
            (feature, threshold, left, right)
        })
    }
}
