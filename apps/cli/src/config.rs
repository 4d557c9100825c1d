use std::path::PathBuf;

use anyhow::{anyhow, Context};
use quantkit_calendar::CN_MARKET;
use quantkit_codes::{CanonicalizerOptions, EightDigitOptionPolicy, FailurePolicy, VendorDialect};

pub struct Config {
    pub dialects: Vec<VendorDialect>,
    pub products_file: Option<PathBuf>,
    pub calendar_file: Option<PathBuf>,
    pub calendar_column: String,
    pub calendar_market: String,
    pub on_failure: FailurePolicy,
    pub options: CanonicalizerOptions,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let dialects = lookup("QK_VENDOR_DIALECTS")
            .unwrap_or_else(|| "wind,vnpy".into())
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<VendorDialect>().map_err(|e| anyhow!(e)))
            .collect::<anyhow::Result<Vec<_>>>()
            .context("Invalid QK_VENDOR_DIALECTS")?;

        let products_file = lookup("QK_PRODUCTS_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let calendar_file = lookup("QK_CALENDAR_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let calendar_column = lookup("QK_CALENDAR_COLUMN").unwrap_or_else(|| "SSE".into());
        let calendar_market = lookup("QK_CALENDAR_MARKET").unwrap_or_else(|| CN_MARKET.into());

        let on_failure: FailurePolicy = lookup("QK_ON_FAILURE")
            .unwrap_or_else(|| "raise".into())
            .parse()
            .map_err(|e: String| anyhow!(e))
            .context("Invalid QK_ON_FAILURE")?;

        let bare_eight_digit = parse_flag(&lookup, "QK_BARE_EIGHT_DIGIT_OPTIONS", false)?;
        let zero_triple_marker = parse_flag(&lookup, "QK_ZERO_TRIPLE_MARKER", true)?;

        Ok(Self {
            dialects,
            products_file,
            calendar_file,
            calendar_column,
            calendar_market,
            on_failure,
            options: CanonicalizerOptions {
                eight_digit_options: if bare_eight_digit {
                    EightDigitOptionPolicy::Bare
                } else {
                    EightDigitOptionPolicy::WithExchange
                },
                zero_triple_marker,
            },
        })
    }
}

fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> anyhow::Result<bool> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().to_lowercase().as_str() {
            "" => Ok(default),
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(anyhow!("Invalid {}: {}", key, other)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.dialects, VendorDialect::DEFAULT_ORDER.to_vec());
        assert!(config.products_file.is_none());
        assert!(config.calendar_file.is_none());
        assert_eq!(config.calendar_column, "SSE");
        assert_eq!(config.calendar_market, "cn");
        assert_eq!(config.on_failure, FailurePolicy::Raise);
        assert_eq!(
            config.options.eight_digit_options,
            EightDigitOptionPolicy::WithExchange
        );
        assert!(config.options.zero_triple_marker);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("QK_VENDOR_DIALECTS", "vnpy"),
            ("QK_CALENDAR_FILE", "/data/calendar.csv"),
            ("QK_CALENDAR_COLUMN", "SZSE"),
            ("QK_ON_FAILURE", "original"),
            ("QK_BARE_EIGHT_DIGIT_OPTIONS", "yes"),
            ("QK_ZERO_TRIPLE_MARKER", "0"),
        ])
        .unwrap();

        assert_eq!(config.dialects, vec![VendorDialect::Vnpy]);
        assert_eq!(
            config.calendar_file.as_deref(),
            Some(std::path::Path::new("/data/calendar.csv"))
        );
        assert_eq!(config.calendar_column, "SZSE");
        assert_eq!(config.on_failure, FailurePolicy::ReturnOriginal);
        assert_eq!(config.options.eight_digit_options, EightDigitOptionPolicy::Bare);
        assert!(!config.options.zero_triple_marker);
    }

    #[test]
    fn test_blank_paths_are_unset() {
        let config = config(&[("QK_PRODUCTS_FILE", "  ")]).unwrap();
        assert!(config.products_file.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("QK_VENDOR_DIALECTS", "wind,bloomberg")]).is_err());
        assert!(config(&[("QK_ON_FAILURE", "ignore")]).is_err());
        assert!(config(&[("QK_ZERO_TRIPLE_MARKER", "maybe")]).is_err());
    }
}
