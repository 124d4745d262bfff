//! Category-level prequalification gate
//!
//! Unlike per-feature fitting, this stage fits one shared vectorizer
//! jointly over every vendor's main category plus the query, so term
//! weights are corpus-relative. It is a global barrier: it needs the
//! full category set before any row can be gated.

use std::sync::Arc;
use vendx_core::{LinguisticResources, Result, TfidfVectorizer, VendorRecord};

pub const DEFAULT_PREQUALIFY_THRESHOLD: f32 = 0.3;

/// Category-level similarity and gate decision for one vendor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prequalification {
    pub main_category_similarity: f32,
    pub prequalified: bool,
}

/// Gate vendors by main-category similarity to the query
///
/// Output is aligned with `records`. When the joint corpus normalizes
/// to nothing (all categories and the query are empty), every vendor
/// scores 0 and fails the gate.
pub fn prequalify_by_category(
    records: &[VendorRecord],
    query: &str,
    threshold: f32,
    resources: &Arc<LinguisticResources>,
) -> Result<Vec<Prequalification>> {
    let mut documents: Vec<String> = records
        .iter()
        .map(|record| resources.normalize(&record.main_category))
        .collect();
    documents.push(resources.normalize(query));

    let doc_refs: Vec<&str> = documents.iter().map(String::as_str).collect();

    let mut vectorizer = TfidfVectorizer::new();
    vectorizer.fit(&doc_refs);

    if !vectorizer.is_fitted() {
        return Ok(records
            .iter()
            .map(|_| Prequalification {
                main_category_similarity: 0.0,
                prequalified: false,
            })
            .collect());
    }

    let query_vector = vectorizer.transform(doc_refs[doc_refs.len() - 1])?;

    doc_refs[..doc_refs.len() - 1]
        .iter()
        .map(|category| {
            let category_vector = vectorizer.transform(category)?;
            let similarity = query_vector
                .cosine_similarity(&category_vector)
                .clamp(0.0, 1.0);
            Ok(Prequalification {
                main_category_similarity: similarity,
                prequalified: similarity >= threshold,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(row: usize, main_category: &str) -> VendorRecord {
        VendorRecord {
            row,
            product_name: format!("Vendor {row}"),
            rating: None,
            seller: "Seller".to_string(),
            main_category: main_category.to_string(),
            features_raw: "[]".to_string(),
        }
    }

    #[test]
    fn test_matching_category_prequalifies() {
        let resources = Arc::new(LinguisticResources::english());
        let records = vec![
            record(0, "Identity Management"),
            record(1, "Accounting Software"),
        ];

        let gates =
            prequalify_by_category(&records, "Identity Management", DEFAULT_PREQUALIFY_THRESHOLD, &resources)
                .unwrap();

        assert!(gates[0].prequalified);
        assert!(gates[0].main_category_similarity > gates[1].main_category_similarity);
        assert!(!gates[1].prequalified);
    }

    #[test]
    fn test_similarities_in_unit_range() {
        let resources = Arc::new(LinguisticResources::english());
        let records = vec![record(0, "CRM"), record(1, "CRM Platform"), record(2, "ERP")];

        let gates = prequalify_by_category(&records, "CRM", 0.3, &resources).unwrap();
        for gate in gates {
            assert!((0.0..=1.0).contains(&gate.main_category_similarity));
        }
    }

    #[test]
    fn test_empty_corpus_fails_gate() {
        let resources = Arc::new(LinguisticResources::english());
        let records = vec![record(0, ""), record(1, "")];

        let gates = prequalify_by_category(&records, "", 0.3, &resources).unwrap();
        assert!(gates.iter().all(|g| !g.prequalified));
        assert!(gates.iter().all(|g| g.main_category_similarity == 0.0));
    }

    #[test]
    fn test_output_aligned_with_input() {
        let resources = Arc::new(LinguisticResources::english());
        let records = vec![record(0, "CRM"), record(1, "ERP"), record(2, "CRM")];

        let gates = prequalify_by_category(&records, "CRM", 0.3, &resources).unwrap();
        assert_eq!(gates.len(), 3);
        assert_eq!(
            gates[0].main_category_similarity,
            gates[2].main_category_similarity
        );
    }
}
