//! Refreshable handle to a canonicalizer.

use std::sync::{Arc, PoisonError, RwLock};

use super::canonicalizer::CodeCanonicalizer;

/// Shares one [`CodeCanonicalizer`] and lets it be replaced as a whole.
///
/// Readers take an `Arc` snapshot with [`load`](Self::load) and keep using it
/// for as long as they like; [`publish`](Self::publish) swaps in a fully built
/// replacement, so no reader ever sees half-refreshed tables.
#[derive(Debug)]
pub struct SharedCanonicalizer {
    current: RwLock<Arc<CodeCanonicalizer>>,
}

impl SharedCanonicalizer {
    pub fn new(canonicalizer: CodeCanonicalizer) -> Self {
        Self {
            current: RwLock::new(Arc::new(canonicalizer)),
        }
    }

    /// The instance currently published.
    pub fn load(&self) -> Arc<CodeCanonicalizer> {
        // The guarded value is a single Arc, so a poisoned lock still holds a valid one
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the published instance, returning the previous one.
    pub fn publish(&self, canonicalizer: CodeCanonicalizer) -> Arc<CodeCanonicalizer> {
        let next = Arc::new(canonicalizer);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        log::debug!("Publishing refreshed code tables");
        std::mem::replace(&mut *guard, next)
    }
}

impl From<CodeCanonicalizer> for SharedCanonicalizer {
    fn from(canonicalizer: CodeCanonicalizer) -> Self {
        Self::new(canonicalizer)
    }
}
