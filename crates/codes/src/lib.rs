//! Quantkit Codes Crate
//!
//! This crate turns instrument codes written in any of the vendor conventions
//! we receive data in into one canonical `SYMBOL.EXCHANGE` form.
//!
//! # Overview
//!
//! The codes crate supports:
//! - Stock, fund and exchange-listed option codes (`000001`, `SZ000001`, `000001.SZ`)
//! - Commodity and financial futures / options (`RB2401`, `M2409C3200`, `rb401.SHF`)
//! - Multiple vendor exchange dialects (Wind, vnpy) merged into one alias table
//! - Year disambiguation of single-digit-year contract codes
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |    Raw code      |  ("rb401", "000001.SZ", "SHF.RB2401")
//! +------------------+
//!          |
//!          v
//! +------------------+     +-------------------------+
//! | SymbolTokenizer  | --> | ExchangeRegistry        |  (vendor token -> MIC)
//! +------------------+     | UnderlyingExchangeTable |  (product root -> MIC)
//!          |               +-------------------------+
//!          v                          |
//! +------------------+                |
//! | CodeCanonicalizer| <--------------+
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  CanonicalCode   |  ("RB2401.XSGE", "000001.XSHE")
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`CanonicalExchange`] - Closed set of ISO 10383 exchange identifiers
//! - [`CanonicalCode`] - Canonical `SYMBOL.EXCHANGE` code
//! - [`ExchangeRegistry`] - Vendor alias table
//! - [`UnderlyingExchangeTable`] - Product root to exchange table
//! - [`CodeCanonicalizer`] - The canonicalization entry point
//! - [`FailurePolicy`] - Caller-side choice between raising and returning the input

pub mod errors;
pub mod models;
pub mod resolver;

pub use errors::{CanonicalizationError, CodeError, ErrorKind, FailurePolicy};

pub use models::{CanonicalCode, CanonicalExchange, ProductEntry, Root, Token};

pub use resolver::{
    code_head, fold_contract_year, security_exchange, split_runs, tokenize, CanonicalizerOptions,
    Clock, CodeCanonicalizer, EightDigitOptionPolicy, ExchangeRegistry, FixedClock,
    ProductCatalog, ProductReference, SharedCanonicalizer, SystemClock, TokenizedCode,
    UnderlyingExchangeTable, VendorDialect,
};
