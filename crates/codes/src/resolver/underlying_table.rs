//! Product root to canonical exchange lookup.

use std::collections::HashMap;

use crate::errors::CodeError;
use crate::models::{CanonicalExchange, Root};

use super::traits::ProductReference;

/// Entries that win over whatever the reference data says.
///
/// `S` is the retired soybean code, still found in old histories; `IO` index
/// options are booked on the Shenzhen stock exchange code.
pub const UNDERLYING_OVERRIDES: &[(&str, CanonicalExchange)] = &[
    ("S", CanonicalExchange::Xdce),
    ("IO", CanonicalExchange::Xshe),
];

/// Product root to [`CanonicalExchange`] table.
#[derive(Debug, Clone, Default)]
pub struct UnderlyingExchangeTable {
    roots: HashMap<Root, CanonicalExchange>,
}

impl UnderlyingExchangeTable {
    /// Build the table from a reference source, then apply
    /// [`UNDERLYING_OVERRIDES`].
    ///
    /// # Errors
    /// [`CodeError::InvalidReferenceData`] if a root is not one or two
    /// upper-case ASCII letters or an exchange value is not a canonical MIC.
    pub fn from_reference(reference: &dyn ProductReference) -> Result<Self, CodeError> {
        let mut roots = HashMap::new();
        for (root, exchange) in reference.underlying_exchanges()? {
            if !is_valid_root(&root) {
                return Err(CodeError::InvalidReferenceData(format!(
                    "product root must be 1-2 upper-case letters, got '{}'",
                    root
                )));
            }
            let exchange = exchange.parse::<CanonicalExchange>().map_err(|e| {
                CodeError::InvalidReferenceData(format!("root {}: {}", root, e))
            })?;
            roots.insert(root, exchange);
        }

        let mut table = Self { roots };
        table.apply_overrides();
        log::debug!("Built underlying table with {} roots", table.len());
        Ok(table)
    }

    /// A table holding only the overrides.
    pub fn overrides_only() -> Self {
        let mut table = Self::default();
        table.apply_overrides();
        table
    }

    fn apply_overrides(&mut self) {
        for (root, exchange) in UNDERLYING_OVERRIDES {
            self.roots.insert((*root).to_string(), *exchange);
        }
    }

    /// Exchange of a product root (case-insensitive).
    pub fn resolve(&self, root: &str) -> Result<CanonicalExchange, CodeError> {
        let key = root.trim().to_uppercase();
        self.roots
            .get(&key)
            .copied()
            .ok_or(CodeError::UnknownUnderlying(key))
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

fn is_valid_root(root: &str) -> bool {
    (1..=2).contains(&root.len()) && root.chars().all(|c| c.is_ascii_uppercase())
}
