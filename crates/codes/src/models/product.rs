use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One futures product from the reference dataset.
///
/// `exchange_iso` is kept as the raw string from the dataset; it is checked
/// against [`CanonicalExchange`](super::CanonicalExchange) when the catalog
/// is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEntry {
    /// Product root letters, e.g. "RB"
    pub underlying: String,
    /// Human readable product name
    pub name: String,
    /// Exchange MIC the product trades on
    pub exchange_iso: String,
    /// First listing date
    pub list_start: NaiveDate,
    /// Delisting date, if the product is no longer traded
    #[serde(default)]
    pub list_end: Option<NaiveDate>,
    /// Classification columns (`classify_a`, `classify_b`, ...)
    #[serde(flatten)]
    pub classify: BTreeMap<String, String>,
}

impl ProductEntry {
    /// Whether the product was listed on `date`.
    pub fn is_listed_on(&self, date: NaiveDate) -> bool {
        date >= self.list_start && self.list_end.map_or(true, |end| date <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_classification() {
        let json = r#"{
            "underlying": "RB",
            "name": "Rebar",
            "exchange_iso": "XSGE",
            "list_start": "2009-03-27",
            "classify_a": "ferrous"
        }"#;
        let entry: ProductEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.underlying, "RB");
        assert_eq!(entry.list_end, None);
        assert_eq!(entry.classify.get("classify_a").map(String::as_str), Some("ferrous"));
    }

    #[test]
    fn test_listing_window() {
        let entry = ProductEntry {
            underlying: "WS".to_string(),
            name: "Strong gluten wheat (old)".to_string(),
            exchange_iso: "XZCE".to_string(),
            list_start: NaiveDate::from_ymd_opt(2003, 3, 28).unwrap(),
            list_end: NaiveDate::from_ymd_opt(2013, 5, 24),
            classify: BTreeMap::new(),
        };
        assert!(entry.is_listed_on(NaiveDate::from_ymd_opt(2010, 1, 4).unwrap()));
        assert!(!entry.is_listed_on(NaiveDate::from_ymd_opt(2014, 1, 2).unwrap()));
        assert!(!entry.is_listed_on(NaiveDate::from_ymd_opt(2000, 1, 4).unwrap()));
    }
}
