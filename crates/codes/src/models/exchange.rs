use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical exchange identifier (ISO 10383 MIC).
///
/// This set is closed: onboarding a new exchange means adding a variant here.
/// Vendor spellings are handled by the alias tables in
/// [`ExchangeRegistry`](crate::resolver::ExchangeRegistry), never by extending
/// this enum at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CanonicalExchange {
    /// China Foreign Exchange Trade System - Bond Connect
    Cfbc,
    /// Shanghai Stock Exchange
    Xshg,
    /// Shenzhen Stock Exchange
    Xshe,
    /// China Financial Futures Exchange
    Ccfx,
    /// Shanghai Futures Exchange
    Xsge,
    /// Dalian Commodity Exchange
    Xdce,
    /// Zhengzhou Commodity Exchange
    Xzce,
    /// Shanghai International Energy Exchange
    Xine,
    /// Guangzhou Futures Exchange
    Gfex,
    /// Shanghai Gold Exchange
    Sgex,
    /// China Stainless Steel Exchange (Wuxi)
    Cssx,
}

impl CanonicalExchange {
    /// Every canonical exchange, in declaration order.
    pub const ALL: [CanonicalExchange; 11] = [
        CanonicalExchange::Cfbc,
        CanonicalExchange::Xshg,
        CanonicalExchange::Xshe,
        CanonicalExchange::Ccfx,
        CanonicalExchange::Xsge,
        CanonicalExchange::Xdce,
        CanonicalExchange::Xzce,
        CanonicalExchange::Xine,
        CanonicalExchange::Gfex,
        CanonicalExchange::Sgex,
        CanonicalExchange::Cssx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalExchange::Cfbc => "CFBC",
            CanonicalExchange::Xshg => "XSHG",
            CanonicalExchange::Xshe => "XSHE",
            CanonicalExchange::Ccfx => "CCFX",
            CanonicalExchange::Xsge => "XSGE",
            CanonicalExchange::Xdce => "XDCE",
            CanonicalExchange::Xzce => "XZCE",
            CanonicalExchange::Xine => "XINE",
            CanonicalExchange::Gfex => "GFEX",
            CanonicalExchange::Sgex => "SGEX",
            CanonicalExchange::Cssx => "CSSX",
        }
    }

    /// Exchanges whose contract codes go through the commodity rule
    /// (continuous markers, single-digit-year folding).
    pub fn is_commodity_futures(&self) -> bool {
        matches!(
            self,
            CanonicalExchange::Xsge
                | CanonicalExchange::Xdce
                | CanonicalExchange::Xzce
                | CanonicalExchange::Xine
        )
    }

    /// Stock exchanges, which also list the 8-digit ETF options.
    pub fn is_stock_exchange(&self) -> bool {
        matches!(self, CanonicalExchange::Xshg | CanonicalExchange::Xshe)
    }
}

impl fmt::Display for CanonicalExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalExchange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        CanonicalExchange::ALL
            .iter()
            .find(|exchange| exchange.as_str() == upper)
            .copied()
            .ok_or_else(|| format!("Unknown canonical exchange: {}", s))
    }
}
