//! JSON-driven futures product catalog.
//!
//! Ships `products.json` in the binary via `include_str!`; a catalog can also
//! be loaded from any JSON string or file with the same schema. Every catalog
//! is validated once when it is built and is read-only afterwards.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::CodeError;
use crate::models::{CanonicalExchange, ProductEntry};

use super::traits::ProductReference;

const PRODUCTS_JSON: &str = include_str!("products.json");

/// Prefix every classification column carries.
pub const CLASSIFY_PREFIX: &str = "classify_";

// ── JSON schema ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ProductFile {
    products: Vec<ProductEntry>,
}

// ── Catalog ──────────────────────────────────────────────────────────────────

/// Futures product reference data, keyed by product root.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: BTreeMap<String, ProductEntry>,
}

impl ProductCatalog {
    /// Catalog compiled into the crate.
    pub fn embedded() -> Result<Self, CodeError> {
        Self::from_json_str(PRODUCTS_JSON)
    }

    /// Parse and validate a catalog from a JSON document.
    ///
    /// # Errors
    /// [`CodeError::Json`] for a document that does not match the schema,
    /// [`CodeError::InvalidReferenceData`] for a lowercase or non-alphabetic
    /// root, a duplicate root, or an `exchange_iso` that is not a canonical MIC.
    pub fn from_json_str(json: &str) -> Result<Self, CodeError> {
        let file: ProductFile = serde_json::from_str(json)?;
        Self::from_entries(file.products)
    }

    /// Read a catalog from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CodeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        log::debug!(
            "Loaded {} products from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Build a catalog from already parsed rows.
    pub fn from_entries(entries: Vec<ProductEntry>) -> Result<Self, CodeError> {
        let mut products = BTreeMap::new();
        let mut seen = HashSet::new();

        for entry in entries {
            let root = entry.underlying.as_str();
            if root.is_empty() || !root.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(CodeError::InvalidReferenceData(format!(
                    "product root must be upper-case letters, got '{}'",
                    root
                )));
            }
            if !seen.insert(root.to_string()) {
                return Err(CodeError::InvalidReferenceData(format!(
                    "duplicate product root '{}'",
                    root
                )));
            }
            entry
                .exchange_iso
                .parse::<CanonicalExchange>()
                .map_err(|e| CodeError::InvalidReferenceData(format!("{}: {}", root, e)))?;
            if let Some(end) = entry.list_end {
                if end < entry.list_start {
                    return Err(CodeError::InvalidReferenceData(format!(
                        "{} delisted before it was listed",
                        root
                    )));
                }
            }
            products.insert(entry.underlying.clone(), entry);
        }

        Ok(Self { products })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Every product root, sorted.
    pub fn all_underlying(&self) -> Vec<&str> {
        self.products.keys().map(String::as_str).collect()
    }

    /// Look up one product (case-insensitive).
    pub fn get(&self, root: &str) -> Option<&ProductEntry> {
        self.products.get(&root.trim().to_uppercase())
    }

    /// Root to label map for one classification column.
    ///
    /// Products without a value in that column are left out. A well-formed
    /// column name that no product carries yields an empty map.
    ///
    /// # Errors
    /// [`CodeError::InvalidArgument`] if `by` does not start with `classify_`.
    pub fn classification(&self, by: &str) -> Result<BTreeMap<String, String>, CodeError> {
        if !by.starts_with(CLASSIFY_PREFIX) {
            return Err(CodeError::InvalidArgument(format!(
                "classification column must start with '{}', got '{}'",
                CLASSIFY_PREFIX, by
            )));
        }

        let map: BTreeMap<String, String> = self
            .products
            .iter()
            .filter_map(|(root, entry)| {
                entry
                    .classify
                    .get(by)
                    .map(|label| (root.clone(), label.clone()))
            })
            .collect();

        if map.is_empty() {
            log::warn!("No product carries classification column '{}'", by);
        }
        Ok(map)
    }

    /// Whether `root` was listed on `date`. Unknown roots are never listed.
    pub fn listed_on(&self, root: &str, date: NaiveDate) -> bool {
        self.get(root).is_some_and(|entry| entry.is_listed_on(date))
    }
}

impl ProductReference for ProductCatalog {
    fn underlying_exchanges(&self) -> Result<BTreeMap<String, String>, CodeError> {
        Ok(self
            .products
            .iter()
            .map(|(root, entry)| (root.clone(), entry.exchange_iso.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_embedded_catalog_is_valid() {
        let catalog = ProductCatalog::embedded().expect("embedded products.json must be valid");
        assert!(catalog.len() > 80);

        let rb = catalog.get("rb").unwrap();
        assert_eq!(rb.exchange_iso, "XSGE");
        assert_eq!(rb.name, "Rebar");
    }

    #[test]
    fn test_all_underlying_sorted() {
        let catalog = ProductCatalog::embedded().unwrap();
        let roots = catalog.all_underlying();
        let mut sorted = roots.clone();
        sorted.sort_unstable();
        assert_eq!(roots, sorted);
        assert!(roots.contains(&"SC"));
        assert!(roots.contains(&"IF"));
    }

    #[test]
    fn test_classification() {
        let catalog = ProductCatalog::embedded().unwrap();
        let sectors = catalog.classification("classify_a").unwrap();
        assert_eq!(sectors.get("CU").map(String::as_str), Some("metal"));
        assert_eq!(sectors.get("M").map(String::as_str), Some("agriculture"));
        assert_eq!(sectors.len(), catalog.len());
    }

    #[test]
    fn test_classification_unknown_column_is_empty() {
        let catalog = ProductCatalog::embedded().unwrap();
        assert!(catalog.classification("classify_zz").unwrap().is_empty());
    }

    #[test]
    fn test_classification_rejects_other_columns() {
        let catalog = ProductCatalog::embedded().unwrap();
        let err = catalog.classification("name").unwrap_err();
        assert!(matches!(err, CodeError::InvalidArgument(_)));
    }

    #[test]
    fn test_listed_on() {
        let catalog = ProductCatalog::embedded().unwrap();
        assert!(catalog.listed_on("LH", date(2021, 6, 1)));
        assert!(!catalog.listed_on("LH", date(2020, 6, 1)));
        // Delisted in 2016
        assert!(!catalog.listed_on("TC", date(2020, 6, 1)));
        assert!(!catalog.listed_on("ZZ", date(2020, 6, 1)));
    }

    #[test]
    fn test_rejects_lowercase_root() {
        let json = r#"{"products": [
            {"underlying": "rb", "name": "Rebar", "exchange_iso": "XSGE", "list_start": "2009-03-27"}
        ]}"#;
        let err = ProductCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CodeError::InvalidReferenceData(_)));
    }

    #[test]
    fn test_rejects_unknown_mic() {
        let json = r#"{"products": [
            {"underlying": "RB", "name": "Rebar", "exchange_iso": "SHFE", "list_start": "2009-03-27"}
        ]}"#;
        let err = ProductCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CodeError::InvalidReferenceData(_)));
    }

    #[test]
    fn test_rejects_duplicate_root() {
        let json = r#"{"products": [
            {"underlying": "RB", "name": "Rebar", "exchange_iso": "XSGE", "list_start": "2009-03-27"},
            {"underlying": "RB", "name": "Rebar", "exchange_iso": "XSGE", "list_start": "2009-03-27"}
        ]}"#;
        assert!(ProductCatalog::from_json_str(json).is_err());
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = ProductCatalog::from_json_str("{").unwrap_err();
        assert!(matches!(err, CodeError::Json(_)));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"products": [
                {{"underlying": "RB", "name": "Rebar", "exchange_iso": "XSGE", "list_start": "2009-03-27", "classify_a": "metal"}}
            ]}}"#
        )
        .unwrap();

        let catalog = ProductCatalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        let exchanges = catalog.underlying_exchanges().unwrap();
        assert_eq!(exchanges.get("RB").map(String::as_str), Some("XSGE"));
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = ProductCatalog::from_json_file("/nonexistent/products.json").unwrap_err();
        assert!(matches!(err, CodeError::Io(_)));
    }
}
