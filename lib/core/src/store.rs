//! Persisted vectorizer store interface
//!
//! A fitted vectorizer is persisted once at ingestion time and
//! resolved again at query time; the pipeline only ever holds the
//! opaque [`VectorizerLocator`], never a copy of the blob. Concrete
//! backends live in `vendx-storage`.

use crate::error::Result;
use crate::tfidf::TfidfVectorizer;
use serde::{Deserialize, Serialize};

/// Key for one persisted vectorizer, unique within an ingestion run
///
/// Derived from the catalog row index and the cleaned feature name.
/// Row indices shift across re-ingestion runs, so keys are not stable
/// across runs; each run writes into its own store root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VectorizerKey {
    row: usize,
    feature: String,
}

impl VectorizerKey {
    /// Build a key, cleaning the feature name down to lowercase
    /// alphanumerics (feature names in the wild carry punctuation)
    #[must_use]
    pub fn new(row: usize, feature_name: &str) -> Self {
        let feature: String = feature_name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        Self { row, feature }
    }

    #[inline]
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    #[must_use]
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// File name this key maps to in file-backed stores
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("vectorizer_row{}_{}.bin", self.row, self.feature)
    }
}

/// Opaque locator for a persisted, fitted vectorizer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VectorizerLocator(String);

impl VectorizerLocator {
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VectorizerLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store for persisted, fitted vectorizers
///
/// `put` must reject an unfitted vectorizer with
/// [`crate::Error::UnfittedVectorizer`] and must publish atomically so
/// a concurrent reader never observes a partial write. `get` returns
/// [`crate::Error::VectorizerNotFound`] for an unresolvable locator;
/// any other error means the store itself is unreachable and is fatal
/// for the operation.
pub trait VectorStore: Send + Sync {
    fn put(&self, key: &VectorizerKey, vectorizer: &TfidfVectorizer) -> Result<VectorizerLocator>;

    fn get(&self, locator: &VectorizerLocator) -> Result<TfidfVectorizer>;
}
