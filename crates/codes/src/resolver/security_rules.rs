//! Exchange inference for stock exchange codes.
//!
//! Stocks, funds, bonds and exchange-listed options on the two stock exchanges
//! are numbered so that the leading digits identify the exchange.

use crate::errors::CodeError;
use crate::models::CanonicalExchange;

/// Shortest digit run accepted after a stuck-on `SZ`/`SH` vendor tag.
pub const MIN_TAGGED_DIGITS: usize = 6;

/// Prefixes checked in this order; the first match wins.
const DIGIT_PREFIXES: &[(&str, CanonicalExchange)] = &[
    ("0", CanonicalExchange::Xshe),
    ("3", CanonicalExchange::Xshe),
    ("159", CanonicalExchange::Xshe),
    // closed-end funds
    ("184", CanonicalExchange::Xshe),
    ("5", CanonicalExchange::Xshg),
    ("6", CanonicalExchange::Xshg),
    ("9", CanonicalExchange::Xshg),
    ("15", CanonicalExchange::Xshg),
    // 50ETF / 300ETF options
    ("1000", CanonicalExchange::Xshg),
];

/// Vendor tags glued directly onto a digit code, e.g. `SZ000001`, `600000SH`.
const STOCK_TAGS: &[(&str, CanonicalExchange)] = &[
    ("SZ", CanonicalExchange::Xshe),
    ("SH", CanonicalExchange::Xshg),
];

/// Stock exchange of an all-digit code.
///
/// ```
/// use quantkit_codes::{security_exchange, CanonicalExchange};
///
/// assert_eq!(security_exchange("000001").unwrap(), CanonicalExchange::Xshe);
/// assert_eq!(security_exchange("600000").unwrap(), CanonicalExchange::Xshg);
/// assert_eq!(security_exchange("10004567").unwrap(), CanonicalExchange::Xshg);
/// assert!(security_exchange("200001").is_err());
/// ```
///
/// # Errors
/// [`CodeError::UnrecognizedDigitPattern`] if `code` is not all digits or
/// matches none of the known numbering prefixes.
pub fn security_exchange(code: &str) -> Result<CanonicalExchange, CodeError> {
    if code.is_empty() || !is_all_digits(code) {
        return Err(CodeError::UnrecognizedDigitPattern(code.to_string()));
    }
    DIGIT_PREFIXES
        .iter()
        .find(|(prefix, _)| code.starts_with(prefix))
        .map(|(_, exchange)| *exchange)
        .ok_or_else(|| CodeError::UnrecognizedDigitPattern(code.to_string()))
}

/// Split a digit code carrying a glued `SZ`/`SH` tag at either end.
///
/// Returns `None` unless the remainder is at least [`MIN_TAGGED_DIGITS`]
/// digits, so futures roots such as `SH` (caustic soda) are left alone.
pub fn strip_stock_tag(code: &str) -> Option<(&str, CanonicalExchange)> {
    STOCK_TAGS.iter().find_map(|(tag, exchange)| {
        let digits = code
            .strip_prefix(tag)
            .or_else(|| code.strip_suffix(tag))?;
        (digits.len() >= MIN_TAGGED_DIGITS && is_all_digits(digits)).then_some((digits, *exchange))
    })
}

pub(crate) fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shenzhen_prefixes() {
        for code in ["000001", "300750", "159919", "184688"] {
            assert_eq!(security_exchange(code).unwrap(), CanonicalExchange::Xshe, "{}", code);
        }
    }

    #[test]
    fn test_shanghai_prefixes() {
        for code in ["600000", "510050", "900901", "150001", "10004567"] {
            assert_eq!(security_exchange(code).unwrap(), CanonicalExchange::Xshg, "{}", code);
        }
    }

    #[test]
    fn test_prefix_order_is_kept() {
        // "159" is checked before "15"
        assert_eq!(security_exchange("159001").unwrap(), CanonicalExchange::Xshe);
        assert_eq!(security_exchange("158001").unwrap(), CanonicalExchange::Xshg);
    }

    #[test]
    fn test_unrecognized_patterns() {
        for code in ["200001", "10", "1001", "", "60a000"] {
            assert!(
                matches!(
                    security_exchange(code),
                    Err(CodeError::UnrecognizedDigitPattern(_))
                ),
                "{}",
                code
            );
        }
    }

    #[test]
    fn test_strip_stock_tag() {
        assert_eq!(strip_stock_tag("SZ000001"), Some(("000001", CanonicalExchange::Xshe)));
        assert_eq!(strip_stock_tag("SH600000"), Some(("600000", CanonicalExchange::Xshg)));
        assert_eq!(strip_stock_tag("000001SZ"), Some(("000001", CanonicalExchange::Xshe)));
        assert_eq!(strip_stock_tag("600000SH"), Some(("600000", CanonicalExchange::Xshg)));
    }

    #[test]
    fn test_strip_stock_tag_leaves_futures_alone() {
        assert_eq!(strip_stock_tag("SH401"), None);
        assert_eq!(strip_stock_tag("SH2409"), None);
        assert_eq!(strip_stock_tag("SZ"), None);
        assert_eq!(strip_stock_tag("RB2401"), None);
    }
}
