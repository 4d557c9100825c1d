//! Contract code normalization for the commodity futures exchanges.
//!
//! Zhengzhou (and some vendors for every exchange) write the contract month as
//! three characters, `YMM`, dropping the decade. The decade is recovered by
//! assuming no contract is listed more than three years ahead:
//!
//! ```text
//! year = current_year + 3            e.g. 2021 + 3 = 2024
//! rest[0] > last digit of year  ->   previous decade (RB812 -> RB1812)
//! otherwise                     ->   same decade     (RB401 -> RB2401)
//! ```

use crate::errors::CodeError;

use super::tokenizer::split_runs;

/// Synthetic series suffixes (continuous, main, index contracts).
pub const CONTINUOUS_MARKERS: &[&str] = &["00", "88", "888", "8888", "99", "9999", "889"];

/// Extra marker some vendors use for index series.
pub const ZERO_TRIPLE_MARKER: &str = "000";

/// Longest accepted product root.
const MAX_ROOT_LEN: usize = 2;

/// Years ahead a contract can be listed.
const LISTING_HORIZON_YEARS: i32 = 3;

/// Prepend the decade digit to a three character `YMM` contract month.
///
/// Any other length is returned unchanged.
///
/// ```
/// use quantkit_codes::fold_contract_year;
///
/// assert_eq!(fold_contract_year("401", 2021), "2401");
/// assert_eq!(fold_contract_year("812", 2021), "1812");
/// assert_eq!(fold_contract_year("2401", 2021), "2401");
/// ```
pub fn fold_contract_year(rest: &str, current_year: i32) -> String {
    if rest.chars().count() != 3 {
        return rest.to_string();
    }
    let horizon = current_year + LISTING_HORIZON_YEARS;
    let last_digit = horizon.rem_euclid(10);
    let decade_digit = (horizon / 10).rem_euclid(10);

    // Compared as characters, so anything sorting after the last digit rolls back
    let last_char = char::from_digit(last_digit as u32, 10).unwrap_or('9');
    let decade = match rest.chars().next() {
        Some(first) if first > last_char => (decade_digit - 1).rem_euclid(10),
        _ => decade_digit,
    };
    format!("{}{}", decade, rest)
}

/// Rewrite a futures / option symbol listed on a commodity exchange.
///
/// Hyphens are removed and anything after a separator is dropped. The first
/// run must be a root of at most two letters and must be followed by a month
/// run. Continuous markers pass through; three character months are folded;
/// option type and strike runs are kept as they are.
pub(crate) fn commodity_symbol(
    symbol: &str,
    current_year: i32,
    zero_triple_marker: bool,
) -> Result<String, CodeError> {
    let cleaned: String = symbol.replace('-', "");
    let cleaned = cleaned.split('.').next().unwrap_or_default();

    let mut runs: Vec<String> = split_runs(cleaned).into_iter().map(str::to_string).collect();
    let root = runs
        .first()
        .ok_or_else(|| CodeError::malformed(symbol, "empty symbol"))?;
    if root.chars().count() > MAX_ROOT_LEN {
        return Err(CodeError::InvalidProductRoot {
            code: cleaned.to_string(),
            root: root.clone(),
        });
    }
    let rest = runs
        .get(1)
        .ok_or_else(|| CodeError::malformed(symbol, "missing contract month"))?;

    if is_continuous_marker(rest, zero_triple_marker) {
        return Ok(runs.concat());
    }
    let folded = fold_contract_year(rest, current_year);
    runs[1] = folded;
    Ok(runs.concat())
}

fn is_continuous_marker(rest: &str, zero_triple_marker: bool) -> bool {
    CONTINUOUS_MARKERS.contains(&rest) || (zero_triple_marker && rest == ZERO_TRIPLE_MARKER)
}
