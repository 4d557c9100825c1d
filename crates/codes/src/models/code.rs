use std::fmt;

use serde::{Deserialize, Serialize};

use super::exchange::CanonicalExchange;

/// Separator between symbol and exchange in every code this crate handles.
pub const CODE_SEPARATOR: char = '.';

/// A canonical instrument code, rendered as `SYMBOL.EXCHANGE`.
///
/// `exchange` is only `None` for 8-digit exchange-listed options when the
/// [`Bare`](crate::resolver::EightDigitOptionPolicy::Bare) policy is active.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalCode {
    pub symbol: String,
    pub exchange: Option<CanonicalExchange>,
}

impl CanonicalCode {
    pub fn new(symbol: impl AsRef<str>, exchange: CanonicalExchange) -> Self {
        Self {
            symbol: symbol.as_ref().to_uppercase(),
            exchange: Some(exchange),
        }
    }

    /// A code without exchange tag.
    pub fn bare(symbol: impl AsRef<str>) -> Self {
        Self {
            symbol: symbol.as_ref().to_uppercase(),
            exchange: None,
        }
    }
}

impl fmt::Display for CanonicalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exchange {
            Some(exchange) => write!(f, "{}{}{}", self.symbol, CODE_SEPARATOR, exchange),
            None => f.write_str(&self.symbol),
        }
    }
}

impl From<CanonicalCode> for String {
    fn from(code: CanonicalCode) -> Self {
        code.to_string()
    }
}
