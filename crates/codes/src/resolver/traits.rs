//! Collaborator traits for the resolver.
//!
//! Defines the seams through which the canonicalizer reaches reference data
//! and the current date, so both can be swapped in tests.

use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDate};

use crate::errors::CodeError;

/// Source of the product root to exchange mapping.
///
/// Refresh and caching are the implementor's concern; the underlying table
/// reads the mapping once when it is built.
pub trait ProductReference: Send + Sync {
    /// Map of product root letters to exchange MIC strings.
    ///
    /// Values are validated by the caller; implementors return them as stored.
    fn underlying_exchanges(&self) -> Result<BTreeMap<String, String>, CodeError>;
}

/// Source of "today" for contract year folding.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Pin the clock to January 1st of `year`.
    pub fn year(year: i32) -> Self {
        Self(NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN))
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
