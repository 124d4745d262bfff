//! Relevance filtering
//!
//! A row survives when at least one feature clears the threshold; this
//! is a max-over-features test, distinct from the averaged score the
//! ranking stage weighs later.

use crate::similarity::SimilarityScoreMap;
use vendx_core::VendorRecord;

pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.6;

/// A vendor row joined with its per-query similarity scores
#[derive(Debug, Clone)]
pub struct ScoredVendor {
    pub record: VendorRecord,
    pub scores: SimilarityScoreMap,
}

/// Drop rows whose best single-feature similarity is below `threshold`
///
/// Survivors come back ordered by `avg_similarity_score` descending as
/// an intermediate convenience; the ranking stage re-establishes the
/// final order.
#[must_use]
pub fn filter_relevant(rows: Vec<ScoredVendor>, threshold: f32) -> Vec<ScoredVendor> {
    let mut kept: Vec<ScoredVendor> = rows
        .into_iter()
        .filter(|row| row.scores.max_score().is_some_and(|max| max >= threshold))
        .collect();

    kept.sort_by(|a, b| {
        b.scores
            .avg_similarity_score
            .partial_cmp(&a.scores.avg_similarity_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn scored(row: usize, feature_scores: &[(&str, f32)]) -> ScoredVendor {
        let scores: HashMap<String, f32> = feature_scores
            .iter()
            .map(|(name, score)| (name.to_string(), *score))
            .collect();
        let counted: Vec<f32> = scores.values().copied().collect();
        let avg = if counted.is_empty() {
            0.0
        } else {
            counted.iter().sum::<f32>() / counted.len() as f32
        };

        ScoredVendor {
            record: VendorRecord {
                row,
                product_name: format!("Vendor {row}"),
                rating: None,
                seller: "Seller".to_string(),
                main_category: "CRM".to_string(),
                features_raw: "[]".to_string(),
            },
            scores: SimilarityScoreMap {
                scores,
                avg_similarity_score: avg,
            },
        }
    }

    #[test]
    fn test_keeps_row_on_single_strong_feature() {
        // Average is low but one feature clears the bar
        let rows = vec![scored(0, &[("SSO", 0.9), ("MFA", 0.0), ("Audit", 0.0)])];
        let kept = filter_relevant(rows, 0.6);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_drops_row_below_threshold() {
        let rows = vec![scored(0, &[("SSO", 0.5), ("MFA", 0.59)])];
        assert!(filter_relevant(rows, 0.6).is_empty());
    }

    #[test]
    fn test_drops_row_with_no_features() {
        let rows = vec![scored(0, &[])];
        assert!(filter_relevant(rows, 0.0).is_empty());
    }

    #[test]
    fn test_ordered_by_average_descending() {
        let rows = vec![
            scored(0, &[("SSO", 0.7), ("MFA", 0.1)]),
            scored(1, &[("SSO", 0.8), ("MFA", 0.8)]),
        ];
        let kept = filter_relevant(rows, 0.6);
        assert_eq!(kept[0].record.row, 1);
        assert_eq!(kept[1].record.row, 0);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let rows = vec![
            scored(0, &[("A", 0.9)]),
            scored(1, &[("A", 0.7)]),
            scored(2, &[("A", 0.5)]),
        ];

        let loose: Vec<usize> = filter_relevant(rows.clone(), 0.4)
            .into_iter()
            .map(|r| r.record.row)
            .collect();
        let strict: Vec<usize> = filter_relevant(rows, 0.8)
            .into_iter()
            .map(|r| r.record.row)
            .collect();

        for row in &strict {
            assert!(loose.contains(row), "strict survivors must be a subset");
        }
        assert_eq!(loose.len(), 3);
        assert_eq!(strict.len(), 1);
    }
}
