//! Query-time similarity scoring
//!
//! The query is normalized once, then pushed through each feature's
//! persisted vectorizer to land in that feature's vector space before
//! the cosine comparison. Rows share no mutable state and score in
//! parallel; this stage only reads from the persisted store.

use crate::ingest::VectorizedRow;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use vendx_core::{Error, LinguisticResources, Result, VectorStore};

/// Per-feature similarity scores for one row, plus the derived average
///
/// Every feature from the vectorized row appears in the map; features
/// that could not be scored carry 0 but are excluded from the
/// average's denominator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityScoreMap {
    pub scores: HashMap<String, f32>,
    pub avg_similarity_score: f32,
}

impl SimilarityScoreMap {
    /// Best single-feature similarity, `None` when the map is empty
    #[must_use]
    pub fn max_score(&self) -> Option<f32> {
        self.scores
            .values()
            .copied()
            .fold(None, |acc, s| Some(acc.map_or(s, |m: f32| m.max(s))))
    }
}

/// Computes query-to-feature cosine similarity through persisted vectorizers
pub struct SimilarityEngine {
    resources: Arc<LinguisticResources>,
}

impl SimilarityEngine {
    #[must_use]
    pub fn new(resources: Arc<LinguisticResources>) -> Self {
        Self { resources }
    }

    /// Normalize a raw query for scoring
    #[inline]
    #[must_use]
    pub fn normalize_query(&self, query: &str) -> String {
        self.resources.normalize(query)
    }

    /// Score one row against an already-normalized query
    ///
    /// Unresolvable or unfit vectorizers and dimension mismatches
    /// score 0 and are excluded from the average's denominator; only a
    /// store-level failure aborts the operation.
    pub fn score_row(
        &self,
        normalized_query: &str,
        row: &VectorizedRow,
        store: &dyn VectorStore,
    ) -> Result<SimilarityScoreMap> {
        let mut scores = HashMap::with_capacity(row.features.len());
        let mut total = 0.0f32;
        let mut counted = 0u32;

        for (feature_name, artifact) in &row.features {
            let Some(artifact) = artifact else {
                scores.insert(feature_name.clone(), 0.0);
                continue;
            };

            let vectorizer = match store.get(&artifact.locator) {
                Ok(v) => v,
                Err(Error::VectorizerNotFound(loc)) => {
                    warn!(row = row.row, feature = %feature_name, locator = %loc, "vectorizer unresolvable, scoring 0");
                    scores.insert(feature_name.clone(), 0.0);
                    continue;
                }
                Err(Error::UnfittedVectorizer(reason)) | Err(Error::Serialization(reason)) => {
                    warn!(row = row.row, feature = %feature_name, %reason, "vectorizer unusable, scoring 0");
                    scores.insert(feature_name.clone(), 0.0);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !vectorizer.is_fitted() {
                warn!(row = row.row, feature = %feature_name, "vectorizer unfit at query time, scoring 0");
                scores.insert(feature_name.clone(), 0.0);
                continue;
            }

            let query_vector = vectorizer.transform(normalized_query)?;

            if query_vector.dim() != artifact.vector.dim() {
                debug!(
                    row = row.row,
                    feature = %feature_name,
                    query_dim = query_vector.dim(),
                    stored_dim = artifact.vector.dim(),
                    "dimension mismatch, forcing similarity to 0"
                );
                scores.insert(feature_name.clone(), 0.0);
                continue;
            }

            let similarity = query_vector
                .cosine_similarity(&artifact.vector)
                .clamp(0.0, 1.0);
            scores.insert(feature_name.clone(), similarity);
            total += similarity;
            counted += 1;
        }

        let avg_similarity_score = if counted > 0 {
            total / counted as f32
        } else {
            0.0
        };

        Ok(SimilarityScoreMap {
            scores,
            avg_similarity_score,
        })
    }

    /// Score a batch of rows, in parallel, against a raw query
    ///
    /// Output order matches input order.
    pub fn score_rows(
        &self,
        query: &str,
        rows: &[&VectorizedRow],
        store: &dyn VectorStore,
    ) -> Result<Vec<SimilarityScoreMap>> {
        let normalized_query = self.normalize_query(query);
        rows.par_iter()
            .map(|row| self.score_row(&normalized_query, row, store))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::FeatureVectorBuilder;
    use crate::test_store::MemoryVectorStore;
    use vendx_core::VendorRecord;

    fn record(row: usize, features_raw: &str) -> VendorRecord {
        VendorRecord {
            row,
            product_name: format!("Vendor {row}"),
            rating: Some(4.0),
            seller: "Seller".to_string(),
            main_category: "Identity Management".to_string(),
            features_raw: features_raw.to_string(),
        }
    }

    fn sso_blob() -> &'static str {
        r#"[{"Category": "Security", "features": [
            {"name": "SSO", "description": "single sign on integration"}
        ]}]"#
    }

    fn setup(blob: &str) -> (SimilarityEngine, VectorizedRow, MemoryVectorStore) {
        let resources = Arc::new(LinguisticResources::english());
        let builder = FeatureVectorBuilder::new(resources.clone());
        let store = MemoryVectorStore::new();
        let row = builder.vectorize_row(&record(0, blob), &store).unwrap();
        (SimilarityEngine::new(resources), row, store)
    }

    #[test]
    fn test_matching_query_scores_above_zero() {
        let (engine, row, store) = setup(sso_blob());
        let query = engine.normalize_query("IAM with SSO");
        let map = engine.score_row(&query, &row, &store).unwrap();

        let sso = *map.scores.get("SSO").unwrap();
        assert!(sso > 0.0 && sso <= 1.0, "got {sso}");
        assert!(map.avg_similarity_score > 0.0);
    }

    #[test]
    fn test_identical_text_scores_one() {
        let (engine, row, store) = setup(sso_blob());
        // Same composite text the builder vectorized
        let query =
            engine.normalize_query("single sign on integration SSO Security Identity Management");
        let map = engine.score_row(&query, &row, &store).unwrap();
        let sso = *map.scores.get("SSO").unwrap();
        assert!((sso - 1.0).abs() < 1e-5, "expected ~1.0, got {sso}");
    }

    #[test]
    fn test_unrelated_query_scores_zero() {
        let (engine, row, store) = setup(sso_blob());
        let query = engine.normalize_query("payroll tax withholding");
        let map = engine.score_row(&query, &row, &store).unwrap();
        assert_eq!(*map.scores.get("SSO").unwrap(), 0.0);
        // The feature was still scorable, so it counts toward the average
        assert_eq!(map.avg_similarity_score, 0.0);
    }

    #[test]
    fn test_dangling_locator_scores_zero_and_is_uncounted() {
        let (engine, row, store) = setup(sso_blob());
        let locator = row.features.get("SSO").unwrap().as_ref().unwrap().locator.clone();
        store.remove(&locator);

        let query = engine.normalize_query("IAM with SSO");
        let map = engine.score_row(&query, &row, &store).unwrap();
        assert_eq!(*map.scores.get("SSO").unwrap(), 0.0);
        assert_eq!(map.avg_similarity_score, 0.0);
    }

    #[test]
    fn test_unreachable_store_is_fatal() {
        let (engine, row, store) = setup(sso_blob());
        store.set_fail_reads(true);

        let query = engine.normalize_query("IAM with SSO");
        let err = engine.score_row(&query, &row, &store).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_null_artifact_excluded_from_average() {
        // The second feature's composite text is stopwords only, so it
        // gets a null artifact; the category and main category are
        // blank to keep extra context out of it.
        let blob = r#"[{"Category": "", "features": [
            {"name": "SSO", "description": "single sign on integration"},
            {"name": "Of", "description": "the and"}
        ]}]"#;
        let resources = Arc::new(LinguisticResources::english());
        let builder = FeatureVectorBuilder::new(resources.clone());
        let store = MemoryVectorStore::new();
        let mut rec = record(0, blob);
        rec.main_category = String::new();
        let row = builder.vectorize_row(&rec, &store).unwrap();
        assert!(row.features.get("Of").unwrap().is_none());

        let engine = SimilarityEngine::new(resources);
        let query = engine.normalize_query("single sign on integration SSO");
        let map = engine.score_row(&query, &row, &store).unwrap();

        assert_eq!(*map.scores.get("Of").unwrap(), 0.0);
        let sso = *map.scores.get("SSO").unwrap();
        // Average over the one counted feature equals its score
        assert!((map.avg_similarity_score - sso).abs() < 1e-6);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let (engine, row, store) = setup(sso_blob());
        let query = engine.normalize_query("IAM with SSO");
        let first = engine.score_row(&query, &row, &store).unwrap();
        let second = engine.score_row(&query, &row, &store).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_rows_preserves_order() {
        let resources = Arc::new(LinguisticResources::english());
        let builder = FeatureVectorBuilder::new(resources.clone());
        let store = MemoryVectorStore::new();

        let records = vec![record(0, sso_blob()), record(1, sso_blob())];
        let rows = builder.vectorize_catalog(&records, &store).unwrap();
        let row_refs: Vec<&VectorizedRow> = rows.iter().collect();

        let engine = SimilarityEngine::new(resources);
        let maps = engine.score_rows("IAM with SSO", &row_refs, &store).unwrap();
        assert_eq!(maps.len(), 2);
        assert_eq!(maps[0], maps[1]);
    }
}
