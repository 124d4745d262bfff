//! # VendX
//!
//! A vendor qualification service: given a software category and a list
//! of required capabilities, it scores a vendor catalog by TF-IDF
//! similarity and returns a ranked shortlist.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! vendx --catalog ./catalog.csv --http-port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vendx::prelude::*;
//!
//! # fn main() -> vendx::Result<()> {
//! let records = load_catalog("catalog.csv")?;
//! let store = Arc::new(FsVectorStore::new("./data")?);
//! let resources = Arc::new(LinguisticResources::english());
//!
//! let engine = QualificationEngine::ingest(
//!     records,
//!     store,
//!     resources,
//!     QualificationConfig::default(),
//! )?;
//!
//! let ranked = engine.qualify("Identity Management", &["SSO".to_string()])?;
//! for vendor in &ranked {
//!     println!("#{} {} ({:.3})", vendor.rank, vendor.record.product_name, vendor.final_score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - `vendx-core` - text normalization, TF-IDF, vectors, catalog model
//! - `vendx-pipeline` - ingestion, similarity scoring, filtering, ranking
//! - `vendx-storage` - persisted vectorizer store, CSV loader, result sinks
//! - `vendx-api` - REST endpoint

// Re-export core types
pub use vendx_core::{
    compose_query, parse_features, Error, FeatureCategory, FeatureEntry, LinguisticResources,
    Result, TfidfVectorizer, Vector, VectorStore, VectorizerKey, VectorizerLocator, VendorRecord,
};

// Re-export pipeline
pub use vendx_pipeline::{
    filter_relevant, rank_vendors, FeatureVectorBuilder, QualificationConfig, QualificationEngine,
    RankedVendor, ScoredVendor, SimilarityEngine, SimilarityScoreMap, VectorizedRow,
};

// Re-export storage
pub use vendx_storage::{load_catalog, FsVectorStore, JsonlSink, ResultSink};

// Re-export API
pub use vendx_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        compose_query, load_catalog, Error, FsVectorStore, LinguisticResources,
        QualificationConfig, QualificationEngine, RankedVendor, Result, RestApi, TfidfVectorizer,
        Vector, VectorStore, VendorRecord,
    };
}
