//! The `YYYYMMDD` trading date and conversions into it.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::convert::{date_to_int8, int8_to_date, int_to_datetime};
use crate::errors::{CalendarError, Result};

/// Text layouts accepted for dates, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"];

/// Text layouts accepted for date-times, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

/// A calendar date stored as its 8-digit `YYYYMMDD` integer.
///
/// Always a valid Gregorian date with a four-digit year. Ordering follows the
/// integer, which is the same as date order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TradingDate(u32);

impl TradingDate {
    /// Fails for years outside `1000..=9999`.
    pub fn from_date(date: NaiveDate) -> Result<Self> {
        date_to_int8(date).map(Self)
    }

    /// Build from a `YYYYMMDD` integer.
    ///
    /// ```
    /// use quantkit_calendar::TradingDate;
    ///
    /// let date = TradingDate::from_int(20240105).unwrap();
    /// assert_eq!(date.as_int(), 20240105);
    /// assert!(TradingDate::from_int(20240230).is_err());
    /// assert!(TradingDate::from_int(1010101).is_err());
    /// ```
    pub fn from_int(value: u32) -> Result<Self> {
        int8_to_date(value as i64).and_then(Self::from_date)
    }

    pub fn as_int(&self) -> u32 {
        self.0
    }

    pub fn to_date(&self) -> NaiveDate {
        // Constructors only admit valid dates
        int8_to_date(self.0 as i64).unwrap_or_default()
    }

    /// Midnight at the start of this date.
    pub fn to_datetime(&self) -> NaiveDateTime {
        self.to_date().and_time(Default::default())
    }
}

impl fmt::Display for TradingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<NaiveDate> for TradingDate {
    type Error = CalendarError;

    fn try_from(date: NaiveDate) -> Result<Self> {
        Self::from_date(date)
    }
}

impl From<TradingDate> for NaiveDate {
    fn from(date: TradingDate) -> Self {
        date.to_date()
    }
}

impl From<TradingDate> for u32 {
    fn from(date: TradingDate) -> Self {
        date.0
    }
}

impl TryFrom<u32> for TradingDate {
    type Error = CalendarError;

    fn try_from(value: u32) -> Result<Self> {
        Self::from_int(value)
    }
}

/// Anything that names a calendar day.
///
/// Integers may use the 8, 14 or 17 digit layouts of
/// [`convert::int_to_datetime`](crate::convert::int_to_datetime); strings may
/// be ISO dates, compact `YYYYMMDD`, or date-times. The time of day is dropped.
pub trait IntoTradingDate {
    fn into_trading_date(self) -> Result<TradingDate>;
}

impl IntoTradingDate for TradingDate {
    fn into_trading_date(self) -> Result<TradingDate> {
        Ok(self)
    }
}

impl IntoTradingDate for NaiveDate {
    fn into_trading_date(self) -> Result<TradingDate> {
        TradingDate::from_date(self)
    }
}

impl IntoTradingDate for NaiveDateTime {
    fn into_trading_date(self) -> Result<TradingDate> {
        TradingDate::from_date(self.date())
    }
}

impl<Tz: TimeZone> IntoTradingDate for DateTime<Tz> {
    fn into_trading_date(self) -> Result<TradingDate> {
        TradingDate::from_date(self.date_naive())
    }
}

impl IntoTradingDate for i64 {
    fn into_trading_date(self) -> Result<TradingDate> {
        int_to_datetime(self).and_then(|dt| TradingDate::from_date(dt.date()))
    }
}

impl IntoTradingDate for u32 {
    fn into_trading_date(self) -> Result<TradingDate> {
        (self as i64).into_trading_date()
    }
}

impl IntoTradingDate for i32 {
    fn into_trading_date(self) -> Result<TradingDate> {
        (self as i64).into_trading_date()
    }
}

impl IntoTradingDate for &str {
    fn into_trading_date(self) -> Result<TradingDate> {
        parse_date(self).and_then(TradingDate::from_date)
    }
}

impl IntoTradingDate for String {
    fn into_trading_date(self) -> Result<TradingDate> {
        self.as_str().into_trading_date()
    }
}

impl IntoTradingDate for &String {
    fn into_trading_date(self) -> Result<TradingDate> {
        self.as_str().into_trading_date()
    }
}

/// Parse a date or date-time string down to its date.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .ok_or_else(|| CalendarError::InvalidDate(text.to_string()))
}
