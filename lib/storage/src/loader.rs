//! Catalog loading
//!
//! Reads the raw vendor catalog CSV into ordered [`VendorRecord`]s.
//! Row identity is the position in the file. A row that fails to
//! deserialize is skipped and logged; only an unreadable file is
//! fatal.

use serde::Deserialize;
use std::path::Path;
use tracing::warn;
use vendx_core::{Error, Result, VendorRecord};

#[derive(Debug, Deserialize)]
struct RawCatalogRow {
    #[serde(default)]
    product_name: String,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    seller: String,
    #[serde(default)]
    main_category: String,
    #[serde(rename = "Features", default)]
    features: String,
}

/// Load a vendor catalog CSV
///
/// Records come back in file order with their row index assigned.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<VendorRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())
        .map_err(|e| Error::Catalog(e.to_string()))?;

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<RawCatalogRow>().enumerate() {
        match result {
            Ok(raw) => records.push(VendorRecord {
                row: records.len(),
                product_name: raw.product_name,
                rating: raw.rating,
                seller: raw.seller,
                main_category: raw.main_category,
                features_raw: raw.features,
            }),
            Err(e) => {
                warn!(row, error = %e, "skipping undeserializable catalog row");
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_basic_catalog() {
        let csv = "product_name,rating,seller,main_category,Features\n\
                   Acme IAM,4.3,Acme,Identity Management,\"[]\"\n\
                   Beta CRM,3.9,Beta,CRM,\"[]\"\n";
        let file = write_csv(csv);

        let records = load_catalog(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row, 0);
        assert_eq!(records[0].product_name, "Acme IAM");
        assert_eq!(records[0].rating, Some(4.3));
        assert_eq!(records[1].row, 1);
        assert_eq!(records[1].main_category, "CRM");
    }

    #[test]
    fn test_missing_rating_is_none() {
        let csv = "product_name,rating,seller,main_category,Features\n\
                   Acme IAM,,Acme,Identity Management,\"[]\"\n";
        let file = write_csv(csv);

        let records = load_catalog(file.path()).unwrap();
        assert_eq!(records[0].rating, None);
    }

    #[test]
    fn test_features_blob_kept_verbatim() {
        let csv = "product_name,rating,seller,main_category,Features\n\
                   Acme,4.0,Acme,IAM,\"[{\"\"Category\"\": \"\"Security\"\", \"\"features\"\": []}]\"\n";
        let file = write_csv(csv);

        let records = load_catalog(file.path()).unwrap();
        assert!(records[0].features_raw.contains("Security"));
        assert!(records[0].feature_catalog().is_ok());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_catalog("/nonexistent/catalog.csv").unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }

    #[test]
    fn test_bad_row_is_skipped() {
        let csv = "product_name,rating,seller,main_category,Features\n\
                   Acme,not-a-number,Acme,IAM,\"[]\"\n\
                   Beta,4.0,Beta,CRM,\"[]\"\n";
        let file = write_csv(csv);

        let records = load_catalog(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_name, "Beta");
        assert_eq!(records[0].row, 0);
    }
}
