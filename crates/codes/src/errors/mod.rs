//! Error types and failure handling for the codes crate.
//!
//! This module provides:
//! - [`CodeError`]: The main error enum for table building and canonicalization
//! - [`CanonicalizationError`]: A [`CodeError`] tagged with the input that caused it
//! - [`ErrorKind`]: Classification used to tell input problems from load-time faults
//! - [`FailurePolicy`]: Caller-side choice between propagating and returning the input

mod kind;
mod policy;

pub use kind::ErrorKind;
pub use policy::FailurePolicy;

use thiserror::Error;

use crate::models::CanonicalExchange;

/// Errors that can occur while building lookup tables or canonicalizing a code.
///
/// Each variant is classified into an [`ErrorKind`] via [`kind`](Self::kind).
#[derive(Error, Debug)]
pub enum CodeError {
    /// The code is structurally invalid (too many separators, empty symbol part,
    /// missing contract month).
    #[error("Malformed code '{code}': {reason}")]
    MalformedCode {
        /// The offending code
        code: String,
        /// What is wrong with it
        reason: String,
    },

    /// The exchange token is not present in the merged alias table.
    #[error("Unknown exchange: {0}")]
    UnknownExchange(String),

    /// The product root is not present in the underlying table.
    #[error("Unknown underlying: {0}")]
    UnknownUnderlying(String),

    /// A pure-digit code does not match any known security numbering prefix.
    #[error("Unrecognized digit pattern: {0}")]
    UnrecognizedDigitPattern(String),

    /// The product root of a futures/options code is longer than two letters.
    #[error("Invalid product root '{root}' in {code}")]
    InvalidProductRoot {
        /// The full symbol being processed
        code: String,
        /// The rejected root
        root: String,
    },

    /// Two alias tables disagree on the target of one vendor token.
    #[error("Conflicting alias for '{token}': already mapped to {existing}, got {incoming}")]
    ConflictingAlias {
        /// The vendor token
        token: String,
        /// The exchange it is already mapped to
        existing: CanonicalExchange,
        /// The exchange the new table maps it to
        incoming: CanonicalExchange,
    },

    /// Reference data (product table) failed validation at load time.
    #[error("Invalid reference data: {0}")]
    InvalidReferenceData(String),

    /// An argument outside the accepted domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading reference data from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reference data is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodeError {
    /// Shorthand for a [`CodeError::MalformedCode`].
    pub(crate) fn malformed(code: &str, reason: impl Into<String>) -> Self {
        Self::MalformedCode {
            code: code.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the classification for this error.
    ///
    /// - [`ErrorKind::Input`]: the code itself cannot be parsed
    /// - [`ErrorKind::Lookup`]: the code parsed but a table has no entry for it
    /// - [`ErrorKind::Configuration`]: tables or reference data are broken
    ///
    /// # Examples
    ///
    /// ```
    /// use quantkit_codes::errors::{CodeError, ErrorKind};
    ///
    /// let error = CodeError::UnknownUnderlying("ZZ".to_string());
    /// assert_eq!(error.kind(), ErrorKind::Lookup);
    ///
    /// let error = CodeError::InvalidReferenceData("bad MIC".to_string());
    /// assert!(error.kind().is_fatal());
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedCode { .. }
            | Self::UnrecognizedDigitPattern(_)
            | Self::InvalidProductRoot { .. }
            | Self::InvalidArgument(_) => ErrorKind::Input,

            Self::UnknownExchange(_) | Self::UnknownUnderlying(_) => ErrorKind::Lookup,

            Self::ConflictingAlias { .. }
            | Self::InvalidReferenceData(_)
            | Self::Io(_)
            | Self::Json(_) => ErrorKind::Configuration,
        }
    }
}

/// A canonicalization failure, carrying the original input and the underlying cause.
#[derive(Error, Debug)]
#[error("Failed to canonicalize '{input}': {cause}")]
pub struct CanonicalizationError {
    /// The raw code as supplied by the caller
    pub input: String,
    /// Why canonicalization failed
    #[source]
    pub cause: CodeError,
}

impl CanonicalizationError {
    pub fn new(input: impl Into<String>, cause: CodeError) -> Self {
        Self {
            input: input.into(),
            cause,
        }
    }

    /// Classification of the underlying cause.
    pub fn kind(&self) -> ErrorKind {
        self.cause.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_is_input() {
        let error = CodeError::malformed("A.B.C", "more than one separator");
        assert_eq!(error.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_digit_pattern_is_input() {
        let error = CodeError::UnrecognizedDigitPattern("200001".to_string());
        assert_eq!(error.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_lookup_misses() {
        assert_eq!(
            CodeError::UnknownExchange("NYSE".to_string()).kind(),
            ErrorKind::Lookup
        );
        assert_eq!(
            CodeError::UnknownUnderlying("ZZ".to_string()).kind(),
            ErrorKind::Lookup
        );
    }

    #[test]
    fn test_conflicting_alias_is_fatal() {
        let error = CodeError::ConflictingAlias {
            token: "SGE".to_string(),
            existing: CanonicalExchange::Sgex,
            incoming: CanonicalExchange::Xshg,
        };
        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert!(error.kind().is_fatal());
    }

    #[test]
    fn test_error_display() {
        let error = CodeError::UnknownUnderlying("ZZ".to_string());
        assert_eq!(format!("{}", error), "Unknown underlying: ZZ");

        let error = CodeError::ConflictingAlias {
            token: "SGE".to_string(),
            existing: CanonicalExchange::Sgex,
            incoming: CanonicalExchange::Xshg,
        };
        assert_eq!(
            format!("{}", error),
            "Conflicting alias for 'SGE': already mapped to SGEX, got XSHG"
        );

        let error = CanonicalizationError::new(
            "ZZ401",
            CodeError::UnknownUnderlying("ZZ".to_string()),
        );
        assert_eq!(
            format!("{}", error),
            "Failed to canonicalize 'ZZ401': Unknown underlying: ZZ"
        );
    }

    #[test]
    fn test_canonicalization_error_keeps_source() {
        use std::error::Error as _;

        let error = CanonicalizationError::new(
            "ZZ401",
            CodeError::UnknownUnderlying("ZZ".to_string()),
        );
        assert_eq!(error.kind(), ErrorKind::Lookup);
        assert!(error.source().is_some());
    }
}
