//! Code resolution.
//!
//! This module turns raw vendor codes into [`CanonicalCode`](crate::CanonicalCode)s.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CodeCanonicalizer                        │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 1. Tokenizer                                            │ │
//! │  │    - SYMBOL / EXCHANGE split on '.'                     │ │
//! │  │    - alphabetic / non-alphabetic runs                   │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! │                           │                                  │
//! │                           ▼                                  │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 2. Exchange resolution                                  │ │
//! │  │    - ExchangeRegistry (vendor token -> MIC)             │ │
//! │  │    - UnderlyingExchangeTable (product root -> MIC)      │ │
//! │  │    - digit prefix rules for stock exchange codes        │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! │                           │                                  │
//! │                           ▼                                  │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 3. Commodity rule                                       │ │
//! │  │    - continuous markers pass through                    │ │
//! │  │    - YMM contract months get their decade back          │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tables are built once at startup and never mutated; a refresh builds a new
//! canonicalizer and publishes it through [`SharedCanonicalizer`].

mod canonicalizer;
mod commodity_rules;
mod exchange_aliases;
mod exchange_registry;
mod product_catalog;
mod security_rules;
mod shared;
mod tokenizer;
mod traits;
mod underlying_table;

// Re-export main types
pub use canonicalizer::{CanonicalizerOptions, CodeCanonicalizer, EightDigitOptionPolicy};
pub use commodity_rules::{fold_contract_year, CONTINUOUS_MARKERS, ZERO_TRIPLE_MARKER};
pub use exchange_aliases::{VendorDialect, VNPY_EXCHANGES, WIND_EXCHANGES};
pub use exchange_registry::ExchangeRegistry;
pub use product_catalog::{ProductCatalog, CLASSIFY_PREFIX};
pub use security_rules::{security_exchange, strip_stock_tag, MIN_TAGGED_DIGITS};
pub use shared::SharedCanonicalizer;
pub use tokenizer::{code_head, split_runs, tokenize, TokenizedCode};
pub use traits::{Clock, FixedClock, ProductReference, SystemClock};
pub use underlying_table::{UnderlyingExchangeTable, UNDERLYING_OVERRIDES};
