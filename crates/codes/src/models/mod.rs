//! Code models
//!
//! This module contains the core data types for code canonicalization:
//! - `types` - Type aliases for vendor tokens and product roots
//! - `exchange` - The closed set of canonical exchanges (CanonicalExchange)
//! - `code` - Canonical `SYMBOL.EXCHANGE` codes (CanonicalCode)
//! - `product` - Futures product reference rows (ProductEntry)

mod code;
mod exchange;
mod product;
mod types;

pub use code::{CanonicalCode, CODE_SEPARATOR};
pub use exchange::CanonicalExchange;
pub use product::ProductEntry;
pub use types::{Root, Token};
