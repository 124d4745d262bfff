//! Vendor catalog model
//!
//! A [`VendorRecord`] is one ingested catalog row; its `features_raw`
//! field carries a JSON-encoded blob that decodes into the typed
//! [`VendorFeatureCatalog`]. Decode failure is recorded per row and
//! never aborts a batch.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One vendor row from the ingested catalog
///
/// Identity is the row index in the catalog; the record itself is
/// immutable after ingestion. Derived columns (vectors, scores, ranks)
/// live in the pipeline's own output types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VendorRecord {
    /// Row index in the ingested catalog
    pub row: usize,
    pub product_name: String,
    pub rating: Option<f32>,
    pub seller: String,
    pub main_category: String,
    /// JSON-encoded feature blob, kept verbatim for the API response
    pub features_raw: String,
}

impl VendorRecord {
    /// Parse the feature blob into its typed catalog
    pub fn feature_catalog(&self) -> Result<VendorFeatureCatalog> {
        parse_features(self.row, &self.features_raw)
    }
}

/// Typed view of a vendor's feature blob
pub type VendorFeatureCatalog = Vec<FeatureCategory>;

/// One category grouping inside a vendor's feature blob
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FeatureCategory {
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(default)]
    pub features: Vec<FeatureEntry>,
}

/// A single named feature with its free-text description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FeatureEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl FeatureEntry {
    /// Working text that gets vectorized for this feature
    ///
    /// The description alone is too sparse to match category-level
    /// queries, so the feature name, its category label and the
    /// vendor's main category are concatenated in.
    #[must_use]
    pub fn composite_text(&self, category: &str, main_category: &str) -> String {
        format!(
            "{} {} {} {}",
            self.description, self.name, category, main_category
        )
    }
}

/// Parse a JSON feature blob into a typed catalog
///
/// An empty or whitespace-only blob and a malformed blob both produce
/// a [`Error::FeatureParse`]; the caller records the error against the
/// row and continues the batch with an empty catalog.
pub fn parse_features(row: usize, features_raw: &str) -> Result<VendorFeatureCatalog> {
    if features_raw.trim().is_empty() {
        return Err(Error::FeatureParse {
            row,
            reason: "empty feature blob".to_string(),
        });
    }

    serde_json::from_str(features_raw).map_err(|e| Error::FeatureParse {
        row,
        reason: e.to_string(),
    })
}
