//! Weighted multi-criterion ranking
//!
//! Similarity and rating are normalized by their column maxima, then
//! combined with the configured weights. Ranks are dense, 1-based and
//! unique; `final_score` is non-increasing in rank order.

use crate::filter::ScoredVendor;
use serde::Serialize;
use vendx_core::VendorRecord;

pub const DEFAULT_WEIGHT_SIMILARITY: f32 = 0.7;
pub const DEFAULT_WEIGHT_RATING: f32 = 0.3;

/// A ranked vendor row, the pipeline's terminal output
#[derive(Debug, Clone, Serialize)]
pub struct RankedVendor {
    #[serde(flatten)]
    pub record: VendorRecord,
    pub avg_similarity_score: f32,
    pub normalized_similarity: f32,
    pub normalized_rating: f32,
    pub final_score: f32,
    /// 1-based dense rank, unique within the ranked set
    pub rank: usize,
}

/// Rank vendors by weighted similarity and rating
///
/// Missing ratings default to 0. Normalization divides by the column
/// max and defines the result as 0 when the max is 0. Weights are
/// accepted as given; they are not forced to sum to 1. The sort is
/// stable, so ties keep their filter-stage order.
#[must_use]
pub fn rank_vendors(
    rows: Vec<ScoredVendor>,
    weight_similarity: f32,
    weight_rating: f32,
) -> Vec<RankedVendor> {
    let max_similarity = rows
        .iter()
        .map(|r| r.scores.avg_similarity_score)
        .fold(0.0f32, f32::max);
    let max_rating = rows
        .iter()
        .map(|r| r.record.rating.unwrap_or(0.0))
        .fold(0.0f32, f32::max);

    let mut ranked: Vec<RankedVendor> = rows
        .into_iter()
        .map(|row| {
            let avg_similarity_score = row.scores.avg_similarity_score;
            let normalized_similarity = if max_similarity > 0.0 {
                avg_similarity_score / max_similarity
            } else {
                0.0
            };
            let normalized_rating = if max_rating > 0.0 {
                row.record.rating.unwrap_or(0.0) / max_rating
            } else {
                0.0
            };

            RankedVendor {
                record: row.record,
                avg_similarity_score,
                normalized_similarity,
                normalized_rating,
                final_score: weight_similarity * normalized_similarity
                    + weight_rating * normalized_rating,
                rank: 0,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (idx, vendor) in ranked.iter_mut().enumerate() {
        vendor.rank = idx + 1;
    }

    ranked
}
