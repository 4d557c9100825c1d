//! Raw code to [`CanonicalCode`] conversion.
//!
//! # Decision order
//!
//! Input is trimmed and upper-cased, then dispatched on its shape:
//!
//! | Separator | Explicit exchange | Handling |
//! |-----------|-------------------|----------|
//! | no  | no  | digits, glued `SZ`/`SH` tag, or product root lookup |
//! | no  | yes | `code` + given exchange |
//! | yes | no  | `SYMBOL.EXG`, or `EXG.SYMBOL` swapped when the left part is an exchange token |
//! | yes | yes | left part + given exchange (the given one wins) |
//!
//! Codes on the four commodity futures exchanges then go through the
//! commodity rule (continuous markers and contract year folding).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{CanonicalizationError, CodeError, FailurePolicy};
use crate::models::{CanonicalCode, CanonicalExchange};

use super::commodity_rules::commodity_symbol;
use super::exchange_registry::ExchangeRegistry;
use super::product_catalog::ProductCatalog;
use super::security_rules::{is_all_digits, security_exchange, strip_stock_tag};
use super::tokenizer::{tokenize, TokenizedCode};
use super::traits::{Clock, SystemClock};
use super::underlying_table::UnderlyingExchangeTable;

/// Length of exchange-listed option codes on the stock exchanges.
const EIGHT_DIGIT_OPTION_LEN: usize = 8;

/// How 8-digit stock exchange option codes are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EightDigitOptionPolicy {
    /// `10004567.XSHG`, like every other code.
    #[default]
    WithExchange,
    /// `10004567`, without exchange tag.
    Bare,
}

/// Behaviour switches for [`CodeCanonicalizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalizerOptions {
    pub eight_digit_options: EightDigitOptionPolicy,
    /// Treat `000` as a continuous marker rather than a contract month.
    pub zero_triple_marker: bool,
}

impl Default for CanonicalizerOptions {
    fn default() -> Self {
        Self {
            eight_digit_options: EightDigitOptionPolicy::WithExchange,
            zero_triple_marker: true,
        }
    }
}

/// Converts vendor codes to canonical `SYMBOL.EXCHANGE` codes.
///
/// Holds only read-only tables, so one instance can be shared across threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use quantkit_codes::{CodeCanonicalizer, FixedClock};
///
/// let canonicalizer = CodeCanonicalizer::builtin()
///     .unwrap()
///     .with_clock(Arc::new(FixedClock::year(2021)));
///
/// let code = canonicalizer.canonicalize("rb401", None).unwrap();
/// assert_eq!(code.to_string(), "RB2401.XSGE");
///
/// let code = canonicalizer.canonicalize("000001", Some("SZ")).unwrap();
/// assert_eq!(code.to_string(), "000001.XSHE");
/// ```
pub struct CodeCanonicalizer {
    registry: ExchangeRegistry,
    underlyings: UnderlyingExchangeTable,
    clock: Arc<dyn Clock>,
    options: CanonicalizerOptions,
}

impl fmt::Debug for CodeCanonicalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeCanonicalizer")
            .field("exchange_tokens", &self.registry.len())
            .field("underlyings", &self.underlyings.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl CodeCanonicalizer {
    /// Create a canonicalizer using the system clock and default options.
    pub fn new(registry: ExchangeRegistry, underlyings: UnderlyingExchangeTable) -> Self {
        Self {
            registry,
            underlyings,
            clock: Arc::new(SystemClock),
            options: CanonicalizerOptions::default(),
        }
    }

    /// Default dialects and the embedded product catalog.
    pub fn builtin() -> Result<Self, CodeError> {
        let catalog = ProductCatalog::embedded()?;
        Ok(Self::new(
            ExchangeRegistry::default(),
            UnderlyingExchangeTable::from_reference(&catalog)?,
        ))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_options(mut self, options: CanonicalizerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &ExchangeRegistry {
        &self.registry
    }

    pub fn underlyings(&self) -> &UnderlyingExchangeTable {
        &self.underlyings
    }

    pub fn options(&self) -> &CanonicalizerOptions {
        &self.options
    }

    /// Canonicalize one code.
    ///
    /// `explicit_exchange` overrides any exchange embedded in `raw`; a blank
    /// value counts as absent.
    pub fn canonicalize(
        &self,
        raw: &str,
        explicit_exchange: Option<&str>,
    ) -> Result<CanonicalCode, CanonicalizationError> {
        self.resolve(raw, explicit_exchange)
            .map_err(|cause| CanonicalizationError::new(raw, cause))
    }

    /// Canonicalize one code and render it, applying `policy` on failure.
    pub fn canonicalize_with_policy(
        &self,
        raw: &str,
        explicit_exchange: Option<&str>,
        policy: FailurePolicy,
    ) -> Result<String, CanonicalizationError> {
        policy.apply(raw, self.canonicalize(raw, explicit_exchange))
    }

    /// Canonicalize a batch of codes, in order.
    ///
    /// Under [`FailurePolicy::Raise`] the first failure aborts the batch.
    pub fn canonicalize_all<I, S>(
        &self,
        codes: I,
        policy: FailurePolicy,
    ) -> Result<Vec<String>, CanonicalizationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes
            .into_iter()
            .map(|raw| self.canonicalize_with_policy(raw.as_ref(), None, policy))
            .collect()
    }

    fn resolve(&self, raw: &str, explicit_exchange: Option<&str>) -> Result<CanonicalCode, CodeError> {
        let code = raw.trim().to_uppercase();
        let explicit = explicit_exchange
            .map(|exchange| exchange.trim().to_uppercase())
            .filter(|exchange| !exchange.is_empty());

        let tokens = tokenize(&code)?;
        let symbol = tokens.symbol();

        let (symbol, exchange_token) = match (tokens.exchange_token.clone(), explicit) {
            (None, None) => return self.resolve_without_exchange(&code, &tokens),
            (None, Some(exchange)) => (symbol, exchange),
            // Some dialects write the exchange first
            (Some(right), None) if self.registry.contains(&symbol) => (right, symbol),
            (Some(right), None) => (symbol, right),
            (Some(_), Some(exchange)) => (symbol, exchange),
        };

        let exchange = self.registry.resolve(&exchange_token)?;
        self.emit(&symbol, exchange)
    }

    /// Codes carrying no exchange at all.
    fn resolve_without_exchange(
        &self,
        code: &str,
        tokens: &TokenizedCode,
    ) -> Result<CanonicalCode, CodeError> {
        if is_all_digits(code) {
            let exchange = security_exchange(code)?;
            return Ok(self.stock_code(code, exchange));
        }
        if let Some((digits, exchange)) = strip_stock_tag(code) {
            return Ok(self.stock_code(digits, exchange));
        }

        let head = tokens.head();
        if !head.starts_with(char::is_alphabetic) {
            // Exchange-listed options written long-hand, e.g. 510050C2412M02500
            let exchange = security_exchange(head)?;
            return Ok(CanonicalCode::new(code, exchange));
        }

        let exchange = self.underlyings.resolve(head)?;
        let symbol = commodity_symbol(code, self.clock.current_year(), self.options.zero_triple_marker)?;
        Ok(CanonicalCode::new(symbol, exchange))
    }

    /// Attach a resolved exchange to a symbol.
    fn emit(&self, symbol: &str, exchange: CanonicalExchange) -> Result<CanonicalCode, CodeError> {
        if exchange.is_commodity_futures() {
            let symbol = commodity_symbol(
                symbol,
                self.clock.current_year(),
                self.options.zero_triple_marker,
            )?;
            return Ok(CanonicalCode::new(symbol, exchange));
        }
        if exchange.is_stock_exchange() {
            return Ok(self.stock_code(symbol, exchange));
        }
        Ok(CanonicalCode::new(symbol, exchange))
    }

    fn stock_code(&self, symbol: &str, exchange: CanonicalExchange) -> CanonicalCode {
        let bare = self.options.eight_digit_options == EightDigitOptionPolicy::Bare
            && symbol.len() == EIGHT_DIGIT_OPTION_LEN
            && is_all_digits(symbol);
        if bare {
            CanonicalCode::bare(symbol)
        } else {
            CanonicalCode::new(symbol, exchange)
        }
    }
}
