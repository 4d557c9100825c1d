//! Trading-day boundaries and natural-time windows.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::date::TradingDate;
use crate::errors::{CalendarError, Result};

/// Market code of the mainland China futures and stock markets.
pub const CN_MARKET: &str = "cn";

/// Time-of-day limits of a market's day session.
///
/// Timestamps between `start` and `end` belong to their own calendar date;
/// anything outside (night trading) belongs to the next trading date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBoundary {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SessionBoundary {
    /// # Errors
    /// [`CalendarError::InvalidArgument`] unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(CalendarError::InvalidArgument(format!(
                "session start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// 06:00 to 18:00.
    pub fn cn() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
        }
    }

    /// Whether `timestamp` falls in the day part, compared on whole hours.
    pub fn is_day_time(&self, timestamp: NaiveDateTime) -> bool {
        (self.start.hour()..self.end.hour()).contains(&timestamp.hour())
    }
}

/// Natural-time span of one trading date: from the end of the previous
/// trading date's day session to the end of this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalWindow {
    pub trading_date: TradingDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl NaturalWindow {
    /// Open-interval membership: both bounds are excluded.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start < timestamp && timestamp < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
