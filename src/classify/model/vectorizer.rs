//! TF-IDF text vectorizers
//!
//! Two analyzers cover the two feature pipelines: lowercase word n-grams
//! for column names, and word-bounded character n-grams for value shapes.
//! Vocabulary is fixed at fit time (capped by total term frequency, ties
//! broken alphabetically for determinism) and the vectorizer is read-only
//! afterwards.

use crate::domain::errors::PrivsenseError;
use crate::domain::result::Result;
use std::collections::HashMap;

/// Tokenization strategy for a vectorizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analyzer {
    /// Lowercased word tokens (2+ chars) joined into n-grams
    Word,
    /// Character n-grams taken inside space-padded word boundaries
    CharWb,
}

/// A fitted TF-IDF vectorizer over a fixed vocabulary
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    analyzer: Analyzer,
    ngram_min: usize,
    ngram_max: usize,
    max_features: usize,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Word n-gram vectorizer (for column names)
    pub fn word(ngram_min: usize, ngram_max: usize, max_features: usize) -> Self {
        Self::unfitted(Analyzer::Word, ngram_min, ngram_max, max_features)
    }

    /// Word-bounded character n-gram vectorizer (for value shapes)
    pub fn char_wb(ngram_min: usize, ngram_max: usize, max_features: usize) -> Self {
        Self::unfitted(Analyzer::CharWb, ngram_min, ngram_max, max_features)
    }

    fn unfitted(
        analyzer: Analyzer,
        ngram_min: usize,
        ngram_max: usize,
        max_features: usize,
    ) -> Self {
        Self {
            analyzer,
            ngram_min,
            ngram_max,
            max_features,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    /// Learn the vocabulary and inverse document frequencies from `docs`.
    ///
    /// When more than `max_features` distinct terms exist, the terms with
    /// the highest total frequency are kept (alphabetical on ties).
    pub fn fit(&mut self, docs: &[String]) -> Result<()> {
        if docs.is_empty() {
            return Err(PrivsenseError::Model(
                "Cannot fit a vectorizer on an empty document list".to_string(),
            ));
        }

        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in docs {
            let terms = self.analyze(doc);
            let mut seen: Vec<&String> = Vec::new();
            for term in &terms {
                *term_freq.entry(term.clone()).or_insert(0) += 1;
                if !seen.contains(&term) {
                    seen.push(term);
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        // Rank by descending total frequency, alphabetical on ties
        let mut ranked: Vec<(String, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        // Index the kept vocabulary alphabetically for stable feature order
        let mut kept: Vec<String> = ranked.into_iter().map(|(t, _)| t).collect();
        kept.sort();

        let n_docs = docs.len() as f64;
        self.vocabulary = HashMap::with_capacity(kept.len());
        self.idf = Vec::with_capacity(kept.len());
        for (idx, term) in kept.into_iter().enumerate() {
            let df = doc_freq.get(&term).copied().unwrap_or(0) as f64;
            // Smoothed idf, as if one extra document contained every term
            self.idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            self.vocabulary.insert(term, idx);
        }

        Ok(())
    }

    /// Transform a document into an l2-normalized TF-IDF vector.
    ///
    /// Terms outside the fitted vocabulary are ignored; a document with
    /// no known terms yields the zero vector.
    pub fn transform(&self, doc: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for term in self.analyze(doc) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                vector[idx] += self.idf[idx];
            }
        }

        let norm: f64 = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }

    /// Number of features in the fitted vocabulary
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Extract analyzer terms from a document
    fn analyze(&self, doc: &str) -> Vec<String> {
        let doc = doc.to_lowercase();
        match self.analyzer {
            Analyzer::Word => self.word_ngrams(&doc),
            Analyzer::CharWb => self.char_wb_ngrams(&doc),
        }
    }

    fn word_ngrams(&self, doc: &str) -> Vec<String> {
        let tokens: Vec<&str> = doc
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.chars().count() >= 2)
            .collect();

        let mut terms = Vec::new();
        for n in self.ngram_min..=self.ngram_max {
            if n == 0 || tokens.len() < n {
                continue;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    fn char_wb_ngrams(&self, doc: &str) -> Vec<String> {
        let mut terms = Vec::new();
        for token in doc.split_whitespace() {
            let padded: Vec<char> = std::iter::once(' ')
                .chain(token.chars())
                .chain(std::iter::once(' '))
                .collect();
            for n in self.ngram_min..=self.ngram_max {
                if n == 0 || padded.len() < n {
                    continue;
                }
                for window in padded.windows(n) {
                    terms.push(window.iter().collect());
                }
            }
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_word_ngrams_include_bigrams() {
        let mut vectorizer = TfidfVectorizer::word(1, 2, 100);
        vectorizer
            .fit(&docs(&["credit card number", "card number"]))
            .unwrap();

        // Unigrams and bigrams both present
        assert!(vectorizer.vocabulary.contains_key("card"));
        assert!(vectorizer.vocabulary.contains_key("card number"));
        assert!(vectorizer.vocabulary.contains_key("credit card"));
    }

    #[test]
    fn test_word_tokens_split_on_underscores() {
        let mut vectorizer = TfidfVectorizer::word(1, 2, 100);
        vectorizer.fit(&docs(&["credit_card_number"])).unwrap();
        assert!(vectorizer.vocabulary.contains_key("credit"));
        assert!(vectorizer.vocabulary.contains_key("credit card"));
    }

    #[test]
    fn test_char_wb_pads_word_boundaries() {
        let mut vectorizer = TfidfVectorizer::char_wb(2, 4, 1000);
        vectorizer.fit(&docs(&["ab cd"])).unwrap();
        // Leading-edge bigram of each padded word
        assert!(vectorizer.vocabulary.contains_key(" a"));
        assert!(vectorizer.vocabulary.contains_key(" c"));
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let mut vectorizer = TfidfVectorizer::word(1, 2, 100);
        vectorizer
            .fit(&docs(&["email address", "phone number", "postal code"]))
            .unwrap();

        let vector = vectorizer.transform("email address");
        let norm: f64 = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_terms_yield_zero_vector() {
        let mut vectorizer = TfidfVectorizer::word(1, 1, 100);
        vectorizer.fit(&docs(&["alpha beta"])).unwrap();

        let vector = vectorizer.transform("gamma delta");
        assert!(vector.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let mut vectorizer = TfidfVectorizer::word(1, 1, 2);
        vectorizer
            .fit(&docs(&["aa bb cc", "aa bb", "aa"]))
            .unwrap();
        assert_eq!(vectorizer.n_features(), 2);
        // Highest-frequency terms survive
        assert!(vectorizer.vocabulary.contains_key("aa"));
        assert!(vectorizer.vocabulary.contains_key("bb"));
    }

    #[test]
    fn test_fit_on_empty_docs_is_an_error() {
        let mut vectorizer = TfidfVectorizer::word(1, 2, 100);
        assert!(vectorizer.fit(&[]).is_err());
    }

    #[test]
    fn test_transform_is_deterministic() {
        let mut vectorizer = TfidfVectorizer::char_wb(2, 4, 50);
        vectorizer
            .fit(&docs(&["123-45-6789", "john@example.com"]))
            .unwrap();
        assert_eq!(
            vectorizer.transform("123-45-6789"),
            vectorizer.transform("123-45-6789")
        );
    }
}
