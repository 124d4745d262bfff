//! # vendx Pipeline
//!
//! The feature-vectorization, similarity and ranking pipeline for the
//! vendx vendor qualification engine.
//!
//! ## Stages
//!
//! - **Ingestion** ([`FeatureVectorBuilder`]): one fitted, persisted
//!   TF-IDF vectorizer per (row, feature), plus the stored vector.
//! - **Prequalification** ([`prequalify_by_category`]): optional
//!   category-level gate over a jointly-fitted vectorizer.
//! - **Scoring** ([`SimilarityEngine`]): per-feature cosine similarity
//!   of the query transformed through each persisted vectorizer.
//! - **Filtering** ([`filter_relevant`]): max-over-features threshold.
//! - **Ranking** ([`rank_vendors`]): weighted, normalized final score
//!   with dense 1-based ranks.
//!
//! [`QualificationEngine`] wires the stages together behind a single
//! `qualify(category, capabilities)` call.
//!
//! ## Data flow
//!
//! ```text
//! catalog rows ──> FeatureVectorBuilder ──> persisted vectors + locators
//!                                                    │
//! query ──> [CategoryPrequalifier] ──> SimilarityEngine
//!                                           │
//!                                    RelevanceFilter
//!                                           │
//!                                     RankingService ──> top-N
//! ```

pub mod engine;
pub mod filter;
pub mod ingest;
pub mod prequalify;
pub mod rank;
pub mod similarity;

#[cfg(test)]
mod test_store;

pub use engine::{QualificationConfig, QualificationEngine};
pub use filter::{filter_relevant, ScoredVendor, DEFAULT_RELEVANCE_THRESHOLD};
pub use ingest::{FeatureArtifact, FeatureVectorBuilder, VectorizedRow};
pub use prequalify::{prequalify_by_category, Prequalification, DEFAULT_PREQUALIFY_THRESHOLD};
pub use rank::{rank_vendors, RankedVendor, DEFAULT_WEIGHT_RATING, DEFAULT_WEIGHT_SIMILARITY};
pub use similarity::{SimilarityEngine, SimilarityScoreMap};
