//! Merged vendor-token to canonical-exchange lookup.
//!
//! The registry is seeded with the identity mapping (every canonical MIC maps
//! to itself) and then merges vendor dialect tables in a fixed order. A token
//! can only ever point at one exchange: a merge that would retarget a token
//! fails and leaves the registry untouched.

use std::collections::HashMap;

use crate::errors::CodeError;
use crate::models::{CanonicalExchange, Token};

use super::exchange_aliases::VendorDialect;

/// Vendor token to [`CanonicalExchange`] table.
#[derive(Debug, Clone)]
pub struct ExchangeRegistry {
    aliases: HashMap<Token, CanonicalExchange>,
}

impl Default for ExchangeRegistry {
    /// Identity mapping plus the Wind and vnpy dialects.
    fn default() -> Self {
        Self::with_dialects(&VendorDialect::DEFAULT_ORDER)
            .expect("built-in dialect tables must not conflict")
    }
}

impl ExchangeRegistry {
    /// Create a registry holding only the identity mapping.
    pub fn new() -> Self {
        let aliases = CanonicalExchange::ALL
            .iter()
            .map(|exchange| (exchange.as_str().to_string(), *exchange))
            .collect();
        Self { aliases }
    }

    /// Create a registry and merge the given dialects in order.
    pub fn with_dialects(dialects: &[VendorDialect]) -> Result<Self, CodeError> {
        let mut registry = Self::new();
        for dialect in dialects {
            registry.merge(dialect.aliases().iter().copied())?;
            log::debug!(
                "Merged {} exchange dialect ({} tokens total)",
                dialect,
                registry.len()
            );
        }
        Ok(registry)
    }

    /// Add a table of aliases.
    ///
    /// Tokens are upper-cased. Re-adding a token with the exchange it already
    /// maps to is a no-op.
    ///
    /// # Errors
    /// [`CodeError::ConflictingAlias`] if any token is already mapped to a
    /// different exchange, or appears twice in `table` with different targets.
    /// Nothing is inserted in that case.
    pub fn merge<I, K>(&mut self, table: I) -> Result<(), CodeError>
    where
        I: IntoIterator<Item = (K, CanonicalExchange)>,
        K: AsRef<str>,
    {
        let mut staged: HashMap<Token, CanonicalExchange> = HashMap::new();
        for (token, incoming) in table {
            let token = token.as_ref().trim().to_uppercase();
            let existing = self
                .aliases
                .get(&token)
                .or_else(|| staged.get(&token))
                .copied();
            match existing {
                Some(existing) if existing != incoming => {
                    return Err(CodeError::ConflictingAlias {
                        token,
                        existing,
                        incoming,
                    });
                }
                Some(_) => {}
                None => {
                    staged.insert(token, incoming);
                }
            }
        }
        self.aliases.extend(staged);
        Ok(())
    }

    /// Look up the canonical exchange for a vendor token (case-insensitive).
    pub fn resolve(&self, token: &str) -> Result<CanonicalExchange, CodeError> {
        let key = token.trim().to_uppercase();
        self.aliases
            .get(&key)
            .copied()
            .ok_or(CodeError::UnknownExchange(key))
    }

    /// Check if a token is known.
    pub fn contains(&self, token: &str) -> bool {
        self.aliases.contains_key(&token.trim().to_uppercase())
    }

    /// Number of known tokens, identity entries included.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// All known tokens, sorted.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.aliases.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }
}
