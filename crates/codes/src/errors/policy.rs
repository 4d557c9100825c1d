use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CanonicalizationError;
use crate::models::CanonicalCode;

/// What a call site does when a code cannot be canonicalized.
///
/// The canonicalizer itself always fails cleanly. Whether a failure aborts the
/// caller or degrades to the untouched input is decided here, per call site.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Propagate the [`CanonicalizationError`].
    #[default]
    Raise,
    /// Log a warning and hand back the raw input unchanged.
    ReturnOriginal,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Raise => "raise",
            FailurePolicy::ReturnOriginal => "original",
        }
    }

    /// Applies this policy to a canonicalization result.
    pub fn apply(
        self,
        raw: &str,
        result: Result<CanonicalCode, CanonicalizationError>,
    ) -> Result<String, CanonicalizationError> {
        match (result, self) {
            (Ok(code), _) => Ok(code.to_string()),
            (Err(err), FailurePolicy::Raise) => Err(err),
            (Err(err), FailurePolicy::ReturnOriginal) => {
                log::warn!("Code conversion failed, keeping original {}: {}", raw, err.cause);
                Ok(raw.to_string())
            }
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raise" | "error" => Ok(FailurePolicy::Raise),
            "original" | "return_original" | "warn" => Ok(FailurePolicy::ReturnOriginal),
            other => Err(format!("Unknown failure policy: {}", other)),
        }
    }
}
