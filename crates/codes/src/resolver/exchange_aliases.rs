//! Vendor exchange dialects.
//!
//! Each data vendor spells exchanges its own way. These tables map a vendor's
//! tokens to canonical exchanges and are merged into one
//! [`ExchangeRegistry`](super::ExchangeRegistry) at startup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::CanonicalExchange;

use CanonicalExchange::*;

/// Wind exchange suffixes.
pub const WIND_EXCHANGES: &[(&str, CanonicalExchange)] = &[
    ("SH", Xshg),
    ("SZ", Xshe),
    ("CFE", Ccfx),
    ("SHF", Xsge),
    ("DCE", Xdce),
    ("CZC", Xzce),
    ("INE", Xine),
    ("SGE", Sgex),
    ("GFE", Gfex),
];

/// vnpy exchange names.
pub const VNPY_EXCHANGES: &[(&str, CanonicalExchange)] = &[
    ("CFFEX", Ccfx),
    ("SHFE", Xsge),
    ("DCE", Xdce),
    ("CZCE", Xzce),
    ("INE", Xine),
    ("GFEX", Gfex),
    ("SSE", Xshg),
    ("SZSE", Xshe),
    ("SGE", Sgex),
    ("WXE", Cssx),
    ("CFETS", Cfbc),
];

/// A vendor naming convention for exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorDialect {
    Wind,
    Vnpy,
}

impl VendorDialect {
    /// Merge order used when the embedding application does not pick one.
    pub const DEFAULT_ORDER: [VendorDialect; 2] = [VendorDialect::Wind, VendorDialect::Vnpy];

    pub fn as_str(&self) -> &'static str {
        match self {
            VendorDialect::Wind => "wind",
            VendorDialect::Vnpy => "vnpy",
        }
    }

    /// The alias table for this dialect.
    pub fn aliases(&self) -> &'static [(&'static str, CanonicalExchange)] {
        match self {
            VendorDialect::Wind => WIND_EXCHANGES,
            VendorDialect::Vnpy => VNPY_EXCHANGES,
        }
    }
}

impl fmt::Display for VendorDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VendorDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wind" => Ok(VendorDialect::Wind),
            "vnpy" => Ok(VendorDialect::Vnpy),
            other => Err(format!("Unknown vendor dialect: {}", other)),
        }
    }
}
