//! TF-IDF vectorizer
//!
//! A fitted vectorizer is fully defined by its vocabulary (term ->
//! column index) and per-term inverse document frequencies, so it can
//! be serialized, persisted and later reloaded to transform new text
//! into the exact vector space it was fit in.
//!
//! Input text is expected to be pre-normalized (see
//! [`crate::text::LinguisticResources::normalize`]); tokenization here
//! is a plain whitespace split.

use crate::error::{Error, Result};
use crate::vector::Vector;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Term-weighting vectorizer with smoothed IDF and L2-normalized output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TfidfVectorizer {
    // term -> column index, assigned in sorted term order for
    // deterministic vector layout across runs
    vocabulary: HashMap<String, usize>,
    // column index -> inverse document frequency
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    /// Whether the vectorizer has a non-empty vocabulary
    #[inline]
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Vocabulary size, which equals the output vector dimensionality
    #[inline]
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Fit the vocabulary and IDF weights on a training corpus
    ///
    /// Terms are indexed in sorted order. IDF uses the smoothed form
    /// `ln((1 + n_docs) / (1 + df)) + 1`, which stays finite for a
    /// single-document corpus (where it collapses to the constant 1).
    pub fn fit(&mut self, documents: &[&str]) {
        let mut doc_freqs: AHashMap<&str, u32> = AHashMap::new();

        for doc in documents {
            let seen: AHashSet<&str> = doc.split_whitespace().collect();
            for term in seen {
                *doc_freqs.entry(term).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<&str> = doc_freqs.keys().copied().collect();
        terms.sort_unstable();

        self.vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();

        let n_docs = documents.len() as f32;
        self.idf = vec![0.0; terms.len()];
        for (term, &idx) in &self.vocabulary {
            let df = doc_freqs.get(term.as_str()).copied().unwrap_or(0) as f32;
            self.idf[idx] = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;
        }
    }

    /// Transform a document into the fitted vector space
    ///
    /// Term counts are weighted by IDF and the result is L2-normalized.
    /// Out-of-vocabulary tokens are ignored.
    pub fn transform(&self, document: &str) -> Result<Vector> {
        if !self.is_fitted() {
            return Err(Error::UnfittedVectorizer(
                "transform called before fit".to_string(),
            ));
        }

        let mut weights = vec![0.0f32; self.vocabulary.len()];
        for token in document.split_whitespace() {
            if let Some(&idx) = self.vocabulary.get(token) {
                weights[idx] += 1.0;
            }
        }

        for (idx, weight) in weights.iter_mut().enumerate() {
            *weight *= self.idf[idx];
        }

        let mut vector = Vector::new(weights);
        vector.normalize();
        Ok(vector)
    }

    /// Fit on the given corpus and transform every document in it
    pub fn fit_transform(&mut self, documents: &[&str]) -> Result<Vec<Vector>> {
        self.fit(documents);
        documents.iter().map(|doc| self.transform(doc)).collect()
    }
}
