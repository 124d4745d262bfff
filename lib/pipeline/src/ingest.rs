//! Ingestion-time feature vectorization
//!
//! For every catalog row, each parsed feature's composite text is
//! normalized and fit into its own fresh TF-IDF vectorizer; the fitted
//! vectorizer is persisted and only the locator travels with the
//! vector. Rows are independent, so the batch fans out across rayon
//! workers, each writing to a distinct persisted key.

use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use vendx_core::{
    Error, LinguisticResources, Result, TfidfVectorizer, Vector, VectorStore, VectorizerKey,
    VectorizerLocator, VendorRecord,
};

/// Persisted artifact pair for one feature
///
/// A vector and its vectorizer locator are always produced together;
/// a feature with no usable text gets neither (see [`VectorizedRow`]).
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureArtifact {
    pub vector: Vector,
    pub locator: VectorizerLocator,
}

/// Vectorization output for one catalog row
#[derive(Debug, Clone, Default)]
pub struct VectorizedRow {
    /// Row index in the ingested catalog
    pub row: usize,
    /// Feature name -> artifact. `None` marks a feature whose composite
    /// text was empty after normalization or whose fit produced an
    /// empty vocabulary.
    pub features: HashMap<String, Option<FeatureArtifact>>,
    /// Recorded decode error when the feature blob failed to parse
    pub parse_error: Option<String>,
}

impl VectorizedRow {
    fn empty(row: usize) -> Self {
        Self {
            row,
            features: HashMap::new(),
            parse_error: None,
        }
    }
}

/// Fits and persists one vectorizer per (row, feature)
pub struct FeatureVectorBuilder {
    resources: Arc<LinguisticResources>,
}

impl FeatureVectorBuilder {
    #[must_use]
    pub fn new(resources: Arc<LinguisticResources>) -> Self {
        Self { resources }
    }

    /// Vectorize one catalog row
    ///
    /// A malformed feature blob yields an empty row with the parse
    /// error recorded; per-feature failures null out that feature
    /// only. Store-level failures are the one fatal class and
    /// propagate to the caller.
    pub fn vectorize_row(
        &self,
        record: &VendorRecord,
        store: &dyn VectorStore,
    ) -> Result<VectorizedRow> {
        let mut out = VectorizedRow::empty(record.row);

        let catalog = match record.feature_catalog() {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(row = record.row, error = %e, "feature blob unusable, row gets no vectors");
                out.parse_error = Some(e.to_string());
                return Ok(out);
            }
        };

        for category in &catalog {
            for feature in &category.features {
                let composite = feature.composite_text(&category.category, &record.main_category);
                let normalized = self.resources.normalize(&composite);

                if normalized.is_empty() {
                    debug!(
                        row = record.row,
                        feature = %feature.name,
                        "empty after normalization, storing null vector"
                    );
                    out.features.insert(feature.name.clone(), None);
                    continue;
                }

                // Training corpus is this single feature's text; the
                // IDF term collapses to a constant and similarity
                // reduces to term-frequency overlap.
                let mut vectorizer = TfidfVectorizer::new();
                vectorizer.fit(&[normalized.as_str()]);

                // Checked before transform, so an empty vocabulary
                // nulls the feature instead of failing the batch.
                if !vectorizer.is_fitted() {
                    warn!(
                        row = record.row,
                        feature = %feature.name,
                        "fit produced empty vocabulary, treating as empty description"
                    );
                    out.features.insert(feature.name.clone(), None);
                    continue;
                }

                let vector = vectorizer.transform(&normalized)?;

                let key = VectorizerKey::new(record.row, &feature.name);
                let locator = match store.put(&key, &vectorizer) {
                    Ok(locator) => locator,
                    Err(Error::UnfittedVectorizer(reason)) => {
                        // Store-side rejection mirrors the empty-vocabulary case
                        warn!(row = record.row, feature = %feature.name, %reason, "store rejected vectorizer");
                        out.features.insert(feature.name.clone(), None);
                        continue;
                    }
                    Err(e) => return Err(e),
                };

                out.features
                    .insert(feature.name.clone(), Some(FeatureArtifact { vector, locator }));
            }
        }

        Ok(out)
    }

    /// Vectorize a whole catalog, rows in parallel
    ///
    /// Output order matches input order. Each row writes to distinct
    /// persisted keys, so no coordination beyond the store's atomic
    /// publish is needed.
    pub fn vectorize_catalog(
        &self,
        records: &[VendorRecord],
        store: &dyn VectorStore,
    ) -> Result<Vec<VectorizedRow>> {
        records
            .par_iter()
            .map(|record| self.vectorize_row(record, store))
            .collect()
    }
}
