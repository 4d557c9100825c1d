use anyhow::Context;
use quantkit_calendar::{CsvCalendarSeed, TradingCalendar};
use quantkit_codes::{
    CodeCanonicalizer, ExchangeRegistry, FailurePolicy, ProductCatalog, SharedCanonicalizer,
    UnderlyingExchangeTable,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub codes: SharedCanonicalizer,
    pub calendar: TradingCalendar,
    pub calendar_market: String,
    pub on_failure: FailurePolicy,
}

pub fn init_tracing() {
    let log_format = std::env::var("QK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_canonicalizer(config: &Config) -> anyhow::Result<CodeCanonicalizer> {
    let registry = ExchangeRegistry::with_dialects(&config.dialects)
        .context("Failed to build exchange registry")?;

    let catalog = match &config.products_file {
        Some(path) => ProductCatalog::from_json_file(path)
            .with_context(|| format!("Failed to load product catalog {}", path.display()))?,
        None => ProductCatalog::embedded().context("Failed to load embedded product catalog")?,
    };
    let underlyings = UnderlyingExchangeTable::from_reference(&catalog)
        .context("Failed to build underlying exchange table")?;

    tracing::debug!(
        "Canonicalizer ready: {} exchange tokens, {} product roots",
        registry.len(),
        underlyings.len()
    );
    Ok(CodeCanonicalizer::new(registry, underlyings).with_options(config.options))
}

pub fn build_calendar(config: &Config) -> anyhow::Result<TradingCalendar> {
    let mut calendar = TradingCalendar::new();
    if let Some(path) = &config.calendar_file {
        let seed = CsvCalendarSeed::new(path, config.calendar_column.as_str());
        let count = calendar
            .bind(&config.calendar_market, &seed)
            .with_context(|| format!("Failed to bind calendar from {}", path.display()))?;
        tracing::info!(
            "Bound {} trading dates to market {}",
            count,
            config.calendar_market
        );
    }
    Ok(calendar)
}

pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    Ok(AppState {
        codes: SharedCanonicalizer::new(build_canonicalizer(config)?),
        calendar: build_calendar(config)?,
        calendar_market: config.calendar_market.clone(),
        on_failure: config.on_failure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_build_state_without_calendar() {
        let state = build_state(&config(&[])).unwrap();
        assert!(state.calendar.markets().is_empty());
        assert_eq!(state.calendar_market, "cn");

        let code = state.codes.load().canonicalize("000001.SZ", None).unwrap();
        assert_eq!(code.to_string(), "000001.XSHE");
    }

    #[test]
    fn test_build_state_binds_calendar_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"SSE\n2024-01-04\n2024-01-05\n2024-01-08\n")
            .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let state = build_state(&config(&[("QK_CALENDAR_FILE", path.as_str())])).unwrap();
        assert_eq!(state.calendar.get("cn").unwrap().len(), 3);
    }

    #[test]
    fn test_missing_products_file_fails() {
        let result = build_canonicalizer(&config(&[(
            "QK_PRODUCTS_FILE",
            "/nonexistent/products.json",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn test_vnpy_only_registry() {
        let canonicalizer = build_canonicalizer(&config(&[("QK_VENDOR_DIALECTS", "vnpy")])).unwrap();
        assert!(canonicalizer.registry().contains("SHFE"));
        assert!(!canonicalizer.registry().contains("SHF"));
    }
}
