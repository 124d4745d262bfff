//! # vendx Core
//!
//! Core library for the vendx vendor qualification engine.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`LinguisticResources`] - Deterministic text normalization (stopwords, lemmas, stems)
//! - [`TfidfVectorizer`] - Fit/transform term weighting with persisted state
//! - [`Vector`] - Dense vector representation with cosine similarity
//! - [`VendorRecord`] - One catalog row with its typed feature catalog
//! - [`VectorStore`] - Interface to the persisted vectorizer store
//!
//! ## Example
//!
//! ```rust
//! use vendx_core::{LinguisticResources, TfidfVectorizer};
//!
//! let resources = LinguisticResources::english();
//! let text = resources.normalize("Single sign-on integrations");
//!
//! let mut vectorizer = TfidfVectorizer::new();
//! let stored = vectorizer.fit_transform(&[text.as_str()]).unwrap();
//!
//! let query = vectorizer.transform(&resources.normalize("sign-on")).unwrap();
//! let similarity = query.cosine_similarity(&stored[0]);
//! assert!(similarity > 0.0);
//! ```

pub mod catalog;
pub mod error;
pub mod query;
pub mod store;
pub mod text;
pub mod tfidf;
pub mod vector;

pub use catalog::{parse_features, FeatureCategory, FeatureEntry, VendorFeatureCatalog, VendorRecord};
pub use error::{Error, Result};
pub use query::compose_query;
pub use store::{VectorStore, VectorizerKey, VectorizerLocator};
pub use text::{LinguisticResources, ENGLISH_STOPWORDS};
pub use tfidf::TfidfVectorizer;
pub use vector::Vector;
