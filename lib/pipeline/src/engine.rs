//! Qualification engine
//!
//! Ties the pipeline stages together over an ingested catalog: a query
//! arrives, candidate rows are gated, scored through the persisted
//! vectorizers, threshold-filtered and ranked. Every stage is a pure
//! transform; the engine itself holds only immutable ingestion output.

use crate::filter::{filter_relevant, ScoredVendor, DEFAULT_RELEVANCE_THRESHOLD};
use crate::ingest::{FeatureVectorBuilder, VectorizedRow};
use crate::prequalify::prequalify_by_category;
use crate::rank::{rank_vendors, RankedVendor, DEFAULT_WEIGHT_RATING, DEFAULT_WEIGHT_SIMILARITY};
use crate::similarity::SimilarityEngine;
use std::sync::Arc;
use tracing::{debug, info};
use vendx_core::{compose_query, Error, LinguisticResources, Result, VectorStore, VendorRecord};

/// Tuning knobs for one engine instance
#[derive(Debug, Clone)]
pub struct QualificationConfig {
    /// Minimum best-feature similarity for a row to survive filtering
    pub relevance_threshold: f32,
    pub weight_similarity: f32,
    pub weight_rating: f32,
    /// When set, gate candidates by category-level similarity first
    pub prequalify_threshold: Option<f32>,
    /// Size of the returned shortlist
    pub top_n: usize,
}

impl Default for QualificationConfig {
    fn default() -> Self {
        Self {
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            weight_similarity: DEFAULT_WEIGHT_SIMILARITY,
            weight_rating: DEFAULT_WEIGHT_RATING,
            prequalify_threshold: None,
            top_n: 10,
        }
    }
}

/// Query front-end over an ingested, vectorized catalog
pub struct QualificationEngine {
    records: Vec<VendorRecord>,
    rows: Vec<VectorizedRow>,
    store: Arc<dyn VectorStore>,
    resources: Arc<LinguisticResources>,
    scorer: SimilarityEngine,
    config: QualificationConfig,
}

impl std::fmt::Debug for QualificationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QualificationEngine")
            .field("records", &self.records.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl QualificationEngine {
    /// Build an engine from pre-vectorized rows
    ///
    /// `rows` must be the vectorization output for exactly `records`.
    pub fn new(
        records: Vec<VendorRecord>,
        rows: Vec<VectorizedRow>,
        store: Arc<dyn VectorStore>,
        resources: Arc<LinguisticResources>,
        config: QualificationConfig,
    ) -> Result<Self> {
        if records.len() != rows.len() {
            return Err(Error::InvalidConfig(format!(
                "{} records but {} vectorized rows",
                records.len(),
                rows.len()
            )));
        }

        let scorer = SimilarityEngine::new(resources.clone());
        Ok(Self {
            records,
            rows,
            store,
            resources,
            scorer,
            config,
        })
    }

    /// Run ingestion-time vectorization and build the engine in one step
    pub fn ingest(
        records: Vec<VendorRecord>,
        store: Arc<dyn VectorStore>,
        resources: Arc<LinguisticResources>,
        config: QualificationConfig,
    ) -> Result<Self> {
        let builder = FeatureVectorBuilder::new(resources.clone());
        let rows = builder.vectorize_catalog(&records, store.as_ref())?;

        let vectorized: usize = rows
            .iter()
            .map(|r| r.features.values().filter(|a| a.is_some()).count())
            .sum();
        let failed = rows.iter().filter(|r| r.parse_error.is_some()).count();
        info!(
            rows = records.len(),
            features = vectorized,
            unparsable_rows = failed,
            "catalog ingested"
        );

        Self::new(records, rows, store, resources, config)
    }

    #[inline]
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &QualificationConfig {
        &self.config
    }

    /// Qualify vendors for a category and capability list
    ///
    /// Returns at most `top_n` ranked vendors. Candidates are first
    /// narrowed to rows whose main category contains the requested
    /// category (case-insensitive); the optional prequalification
    /// gate then prunes on category similarity before feature scoring.
    pub fn qualify(
        &self,
        software_category: &str,
        capabilities: &[String],
    ) -> Result<Vec<RankedVendor>> {
        let query = compose_query(software_category, capabilities);
        debug!(%query, "qualifying vendors");

        let category_lower = software_category.to_lowercase();
        let mut candidates: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.main_category.to_lowercase().contains(&category_lower))
            .map(|(idx, _)| idx)
            .collect();

        if let Some(threshold) = self.config.prequalify_threshold {
            let gates =
                prequalify_by_category(&self.records, &query, threshold, &self.resources)?;
            candidates.retain(|&idx| gates[idx].prequalified);
        }

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let candidate_rows: Vec<&VectorizedRow> =
            candidates.iter().map(|&idx| &self.rows[idx]).collect();
        let score_maps = self
            .scorer
            .score_rows(&query, &candidate_rows, self.store.as_ref())?;

        let scored: Vec<ScoredVendor> = candidates
            .iter()
            .zip(score_maps)
            .map(|(&idx, scores)| ScoredVendor {
                record: self.records[idx].clone(),
                scores,
            })
            .collect();

        let relevant = filter_relevant(scored, self.config.relevance_threshold);
        let mut ranked = rank_vendors(
            relevant,
            self.config.weight_similarity,
            self.config.weight_rating,
        );
        ranked.truncate(self.config.top_n);

        debug!(results = ranked.len(), "qualification complete");
        Ok(ranked)
    }
}
