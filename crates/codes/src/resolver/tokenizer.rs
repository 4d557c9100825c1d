//! Structural splitting of raw codes.
//!
//! A raw code is split once on the separator into a symbol part and an
//! optional exchange token, and the symbol part is split into maximal runs
//! that alternate between alphabetic and non-alphabetic characters:
//!
//! ```text
//! "M2409C3200.DCE" -> parts ["M", "2409", "C", "3200"], exchange_token "DCE"
//! "000001"         -> parts ["000001"],                  exchange_token None
//! ```

use crate::errors::CodeError;
use crate::models::CODE_SEPARATOR;

/// Result of [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedCode {
    /// Alternating alphabetic / non-alphabetic runs of the symbol part.
    /// Never empty.
    pub parts: Vec<String>,
    /// Whatever followed the separator, if there was one.
    pub exchange_token: Option<String>,
}

impl TokenizedCode {
    /// Product root or leading digit group.
    pub fn head(&self) -> &str {
        &self.parts[0]
    }

    /// The run after the head (contract month for futures), if any.
    pub fn rest(&self) -> Option<&str> {
        self.parts.get(1).map(String::as_str)
    }

    /// The symbol part with all runs joined back together.
    pub fn symbol(&self) -> String {
        self.parts.concat()
    }
}

/// Split a code into symbol runs and an optional exchange token.
///
/// # Errors
/// [`CodeError::MalformedCode`] when the code holds more than one separator,
/// or when either side of the separator is empty.
pub fn tokenize(raw: &str) -> Result<TokenizedCode, CodeError> {
    let mut pieces = raw.split(CODE_SEPARATOR);
    let symbol = pieces.next().unwrap_or_default();
    let exchange_token = pieces.next();
    if pieces.next().is_some() {
        return Err(CodeError::malformed(raw, "more than one separator"));
    }

    if symbol.is_empty() {
        return Err(CodeError::malformed(raw, "empty symbol before separator"));
    }
    if exchange_token == Some("") {
        return Err(CodeError::malformed(raw, "empty exchange after separator"));
    }

    Ok(TokenizedCode {
        parts: split_runs(symbol).into_iter().map(str::to_string).collect(),
        exchange_token: exchange_token.map(str::to_string),
    })
}

/// Split `s` into maximal runs of alphabetic and non-alphabetic characters.
///
/// ```
/// use quantkit_codes::split_runs;
///
/// assert_eq!(split_runs("RB2401C3200"), vec!["RB", "2401", "C", "3200"]);
/// assert_eq!(split_runs("000001"), vec!["000001"]);
/// ```
pub fn split_runs(s: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, ch) in s.char_indices() {
        let alpha = ch.is_alphabetic();
        match current {
            Some(kind) if kind != alpha => {
                runs.push(&s[start..idx]);
                start = idx;
            }
            _ => {}
        }
        current = Some(alpha);
    }
    if start < s.len() {
        runs.push(&s[start..]);
    }
    runs
}

/// Grouping key for a code: the product root for futures and options,
/// otherwise the first three characters of the leading digit group.
///
/// The exchange part, if any, is ignored; only the symbol needs to come first.
///
/// ```
/// use quantkit_codes::code_head;
///
/// assert_eq!(code_head("RB2401.XSGE").unwrap(), "RB");
/// assert_eq!(code_head("510050C2412M02500").unwrap(), "510");
/// assert_eq!(code_head("88").unwrap(), "88");
/// ```
pub fn code_head(code: &str) -> Result<String, CodeError> {
    let tokens = tokenize(code)?;
    let head = tokens.head();
    if head.chars().all(char::is_alphabetic) {
        return Ok(head.to_string());
    }
    Ok(head.chars().take(3).collect())
}
