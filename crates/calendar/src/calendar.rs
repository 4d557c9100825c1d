//! Per-market trading calendars.
//!
//! Each market holds an ascending, duplicate-free list of [`TradingDate`]s.
//! Every lookup is a binary search over that list:
//!
//! | Query | Search | Past either end |
//! |-------|--------|-----------------|
//! | previous | left insertion point, `n` back | clamps to the earliest date |
//! | next | right insertion point, `n - 1` on | clamps to the latest date |
//! | range | `[left(start), right(end))` | empty |
//!
//! A market's list is replaced wholesale by [`set`](TradingCalendar::set),
//! never edited in place.

use std::collections::HashMap;
use std::fmt::Write as _;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::date::{IntoTradingDate, TradingDate};
use crate::errors::{CalendarError, Result};
use crate::seed::CalendarSeed;
use crate::session::{NaturalWindow, SessionBoundary, CN_MARKET};

/// Night-session timestamps are shifted back by this much before looking up
/// the next trading date.
const NIGHT_SHIFT_HOURS: i64 = 4;

/// Output representation for [`TradingCalendar::dates_in_range_as`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRepr {
    /// `YYYYMMDD` integers
    Int,
    Date,
    /// Midnight of each date
    DateTime,
    /// `strftime` pattern applied to midnight of each date
    Formatted(String),
}

/// A date in the representation chosen by [`DateRepr`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DateValue {
    Int(u32),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

/// Trading dates and session boundaries per market.
#[derive(Debug, Clone)]
pub struct TradingCalendar {
    dates: HashMap<String, Vec<TradingDate>>,
    sessions: HashMap<String, SessionBoundary>,
}

impl Default for TradingCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl TradingCalendar {
    /// An empty calendar with the `cn` session boundary preset.
    pub fn new() -> Self {
        let mut sessions = HashMap::new();
        sessions.insert(CN_MARKET.to_string(), SessionBoundary::cn());
        Self {
            dates: HashMap::new(),
            sessions,
        }
    }

    // ── Binding ──────────────────────────────────────────────────────────────

    /// Replace the trading dates of `market`.
    ///
    /// Input order and duplicates do not matter. Returns the number of
    /// distinct dates stored.
    ///
    /// # Errors
    /// [`CalendarError::EmptyCalendar`] if `dates` is empty, or the first
    /// conversion error. The previous list is kept in both cases.
    pub fn set<I, D>(&mut self, market: &str, dates: I) -> Result<usize>
    where
        I: IntoIterator<Item = D>,
        D: IntoTradingDate,
    {
        let mut sorted = dates
            .into_iter()
            .map(IntoTradingDate::into_trading_date)
            .collect::<Result<Vec<_>>>()?;
        if sorted.is_empty() {
            return Err(CalendarError::EmptyCalendar(market.to_string()));
        }
        sorted.sort_unstable();
        sorted.dedup();

        let count = sorted.len();
        self.dates.insert(market.to_string(), sorted);
        Ok(count)
    }

    /// Load `market` from a seed.
    pub fn bind(&mut self, market: &str, seed: &dyn CalendarSeed) -> Result<usize> {
        let count = self.set(market, seed.load()?)?;
        log::info!("Bound {} trading dates for market {}", count, market);
        Ok(count)
    }

    /// The trading dates of `market`, ascending.
    pub fn get(&self, market: &str) -> Result<&[TradingDate]> {
        self.dates
            .get(market)
            .map(Vec::as_slice)
            .ok_or_else(|| CalendarError::CalendarNotBound(market.to_string()))
    }

    /// Markets with bound dates, sorted.
    pub fn markets(&self) -> Vec<&str> {
        let mut markets: Vec<&str> = self.dates.keys().map(String::as_str).collect();
        markets.sort_unstable();
        markets
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// The `n`-th trading date strictly before `date`.
    ///
    /// Clamps to the earliest date when fewer than `n` dates precede `date`.
    pub fn previous_trading_date(
        &self,
        market: &str,
        date: impl IntoTradingDate,
        n: usize,
    ) -> Result<TradingDate> {
        let dates = self.get(market)?;
        check_step(n)?;
        let date = date.into_trading_date()?;

        let pos = dates.partition_point(|d| *d < date);
        Ok(if pos > n { dates[pos - n] } else { dates[0] })
    }

    /// The `n`-th trading date strictly after `date`.
    ///
    /// Clamps to the latest date when fewer than `n` dates follow `date`.
    pub fn next_trading_date(
        &self,
        market: &str,
        date: impl IntoTradingDate,
        n: usize,
    ) -> Result<TradingDate> {
        let dates = self.get(market)?;
        check_step(n)?;
        let date = date.into_trading_date()?;

        let pos = dates.partition_point(|d| *d <= date);
        Ok(pos
            .checked_add(n - 1)
            .and_then(|index| dates.get(index))
            .copied()
            .unwrap_or(dates[dates.len() - 1]))
    }

    pub fn is_trading_date(&self, market: &str, date: impl IntoTradingDate) -> Result<bool> {
        let dates = self.get(market)?;
        let date = date.into_trading_date()?;
        Ok(dates.binary_search(&date).is_ok())
    }

    /// Trading dates between `start` and `end`, both included.
    pub fn dates_in_range(
        &self,
        market: &str,
        start: impl IntoTradingDate,
        end: impl IntoTradingDate,
    ) -> Result<&[TradingDate]> {
        let dates = self.get(market)?;
        let start = start.into_trading_date()?;
        let end = end.into_trading_date()?;

        let from = dates.partition_point(|d| *d < start);
        let to = dates.partition_point(|d| *d <= end);
        Ok(if from < to { &dates[from..to] } else { &[] })
    }

    /// [`dates_in_range`](Self::dates_in_range) converted to `repr`.
    pub fn dates_in_range_as(
        &self,
        market: &str,
        start: impl IntoTradingDate,
        end: impl IntoTradingDate,
        repr: &DateRepr,
    ) -> Result<Vec<DateValue>> {
        self.dates_in_range(market, start, end)?
            .iter()
            .map(|date| represent(*date, repr))
            .collect()
    }

    // ── Sessions ─────────────────────────────────────────────────────────────

    pub fn set_session_boundary(&mut self, market: &str, boundary: SessionBoundary) {
        self.sessions.insert(market.to_string(), boundary);
    }

    pub fn session_boundary(&self, market: &str) -> Result<SessionBoundary> {
        self.sessions
            .get(market)
            .copied()
            .ok_or_else(|| CalendarError::UnknownMarket(market.to_string()))
    }

    /// Natural-time window of the trading date in effect on `date`.
    ///
    /// The effective date is `date` itself when it is a trading date, else the
    /// previous one. The window runs from the session end of the trading date
    /// before it to the session end of the effective date. For the earliest
    /// date of the calendar the window is empty.
    pub fn trading_date_to_natural_window(
        &self,
        market: &str,
        date: impl IntoTradingDate,
    ) -> Result<NaturalWindow> {
        let boundary = self.session_boundary(market)?;
        let date = date.into_trading_date()?;

        let effective = if self.is_trading_date(market, date)? {
            date
        } else {
            self.previous_trading_date(market, date, 1)?
        };
        let previous = self.previous_trading_date(market, effective, 1)?;

        Ok(NaturalWindow {
            trading_date: effective,
            start: previous.to_date().and_time(boundary.end),
            end: effective.to_date().and_time(boundary.end),
        })
    }

    /// The trading date a natural timestamp is booked under.
    ///
    /// Day-time timestamps keep their calendar date. Anything else is shifted
    /// back four hours and assigned to the next trading date after that.
    pub fn current_trading_date(&self, market: &str, timestamp: NaiveDateTime) -> Result<TradingDate> {
        let boundary = self.session_boundary(market)?;
        if boundary.is_day_time(timestamp) {
            return TradingDate::from_date(timestamp.date());
        }
        self.next_trading_date(market, timestamp - Duration::hours(NIGHT_SHIFT_HOURS), 1)
    }
}

fn check_step(n: usize) -> Result<()> {
    if n < 1 {
        return Err(CalendarError::InvalidArgument(format!(
            "n must be a positive number, got {}",
            n
        )));
    }
    Ok(())
}

fn represent(date: TradingDate, repr: &DateRepr) -> Result<DateValue> {
    Ok(match repr {
        DateRepr::Int => DateValue::Int(date.as_int()),
        DateRepr::Date => DateValue::Date(date.to_date()),
        DateRepr::DateTime => DateValue::DateTime(date.to_datetime()),
        DateRepr::Formatted(pattern) => {
            let mut text = String::new();
            write!(text, "{}", date.to_datetime().format(pattern)).map_err(|_| {
                CalendarError::InvalidArgument(format!("invalid date format '{}'", pattern))
            })?;
            DateValue::Text(text)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn td(value: u32) -> TradingDate {
        TradingDate::from_int(value).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    /// First two weeks of January 2024 (New Year's Day and weekends closed).
    fn calendar() -> TradingCalendar {
        let mut calendar = TradingCalendar::new();
        calendar
            .set(
                "cn",
                [
                    20240102u32, 20240103, 20240104, 20240105, 20240108, 20240109, 20240110,
                    20240111, 20240112,
                ],
            )
            .unwrap();
        calendar
    }

    // ── Binding ──────────────────────────────────────────────────────────────

    #[test]
    fn test_set_sorts_and_dedups() {
        let mut calendar = TradingCalendar::new();
        let count = calendar
            .set("cn", ["2024-01-03", "2024-01-02", "20240103", "2024-01-04"])
            .unwrap();
        assert_eq!(count, 3);
        assert_eq!(
            calendar.get("cn").unwrap(),
            &[td(20240102), td(20240103), td(20240104)]
        );
    }

    #[test]
    fn test_set_replaces_previous_dates() {
        let mut calendar = calendar();
        calendar.set("cn", [20250102u32]).unwrap();
        assert_eq!(calendar.get("cn").unwrap(), &[td(20250102)]);
    }

    #[test]
    fn test_set_rejects_empty() {
        let mut calendar = calendar();
        let err = calendar.set("cn", Vec::<u32>::new()).unwrap_err();
        assert!(matches!(err, CalendarError::EmptyCalendar(_)));
        // Previous dates survive
        assert_eq!(calendar.get("cn").unwrap().len(), 9);
    }

    #[test]
    fn test_set_rejects_invalid_dates() {
        let mut calendar = TradingCalendar::new();
        let err = calendar.set("cn", [20240102u32, 20240230]).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidDate(_)));
        assert!(calendar.get("cn").is_err());
    }

    #[test]
    fn test_get_unbound_market() {
        let calendar = TradingCalendar::new();
        match calendar.get("cn") {
            Err(CalendarError::CalendarNotBound(market)) => assert_eq!(market, "cn"),
            other => panic!("Expected CalendarNotBound, got {:?}", other),
        }
    }

    #[test]
    fn test_bind_from_seed() {
        let mut calendar = TradingCalendar::new();
        let seed = vec![
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        ];
        assert_eq!(calendar.bind("hk", &seed).unwrap(), 2);
        assert_eq!(calendar.markets(), vec!["hk"]);
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    #[test]
    fn test_previous_trading_date() {
        let calendar = calendar();
        assert_eq!(calendar.previous_trading_date("cn", 20240108u32, 1).unwrap(), td(20240105));
        assert_eq!(calendar.previous_trading_date("cn", 20240108u32, 3).unwrap(), td(20240103));
        // Saturday
        assert_eq!(calendar.previous_trading_date("cn", 20240106u32, 1).unwrap(), td(20240105));
    }

    #[test]
    fn test_previous_trading_date_clamps() {
        let calendar = calendar();
        assert_eq!(calendar.previous_trading_date("cn", 20240103u32, 5).unwrap(), td(20240102));
        assert_eq!(calendar.previous_trading_date("cn", 20231201u32, 1).unwrap(), td(20240102));
    }

    #[test]
    fn test_next_trading_date() {
        let calendar = calendar();
        assert_eq!(calendar.next_trading_date("cn", 20240105u32, 1).unwrap(), td(20240108));
        assert_eq!(calendar.next_trading_date("cn", 20240106u32, 2).unwrap(), td(20240109));
        assert_eq!(calendar.next_trading_date("cn", 20231229u32, 1).unwrap(), td(20240102));
    }

    #[test]
    fn test_next_trading_date_clamps() {
        let calendar = calendar();
        assert_eq!(calendar.next_trading_date("cn", 20240111u32, 5).unwrap(), td(20240112));
        assert_eq!(calendar.next_trading_date("cn", 20240301u32, 1).unwrap(), td(20240112));
    }

    #[test]
    fn test_huge_steps_clamp() {
        let calendar = calendar();
        assert_eq!(
            calendar.next_trading_date("cn", 20240105u32, usize::MAX).unwrap(),
            td(20240112)
        );
        assert_eq!(
            calendar.previous_trading_date("cn", 20240110u32, usize::MAX).unwrap(),
            td(20240102)
        );
    }

    #[test]
    fn test_clamps_on_three_day_calendar() {
        let mut calendar = TradingCalendar::new();
        calendar.set("cn", [20210104u32, 20210105, 20210106]).unwrap();

        assert_eq!(calendar.previous_trading_date("cn", 20210104u32, 1).unwrap(), td(20210104));
        assert_eq!(calendar.next_trading_date("cn", 20210106u32, 1).unwrap(), td(20210106));
        assert_eq!(calendar.next_trading_date("cn", 20210104u32, usize::MAX).unwrap(), td(20210106));
    }

    #[test]
    fn test_set_rejects_years_outside_eight_digits() {
        let mut calendar = calendar();
        let bc = NaiveDate::from_ymd_opt(-1, 6, 15).unwrap();
        assert!(matches!(
            calendar.set("cn", [bc]),
            Err(CalendarError::InvalidDate(_))
        ));
        assert_eq!(calendar.get("cn").unwrap().len(), 9);
    }

    #[test]
    fn test_step_must_be_positive() {
        let calendar = calendar();
        assert!(matches!(
            calendar.previous_trading_date("cn", 20240108u32, 0),
            Err(CalendarError::InvalidArgument(_))
        ));
        assert!(matches!(
            calendar.next_trading_date("cn", 20240108u32, 0),
            Err(CalendarError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_is_trading_date() {
        let calendar = calendar();
        assert!(calendar.is_trading_date("cn", "2024-01-05").unwrap());
        assert!(!calendar.is_trading_date("cn", "2024-01-06").unwrap());
        assert!(calendar.is_trading_date("us", "2024-01-05").is_err());
    }

    #[test]
    fn test_dates_in_range() {
        let calendar = calendar();
        assert_eq!(
            calendar.dates_in_range("cn", 20240105u32, 20240109u32).unwrap(),
            &[td(20240105), td(20240108), td(20240109)]
        );
        assert_eq!(
            calendar.dates_in_range("cn", 20240106u32, 20240107u32).unwrap(),
            &[] as &[TradingDate]
        );
        assert!(calendar
            .dates_in_range("cn", 20240110u32, 20240102u32)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_dates_in_range_as() {
        let calendar = calendar();

        let ints = calendar
            .dates_in_range_as("cn", 20240104u32, 20240105u32, &DateRepr::Int)
            .unwrap();
        assert_eq!(ints, vec![DateValue::Int(20240104), DateValue::Int(20240105)]);

        let dates = calendar
            .dates_in_range_as("cn", 20240104u32, 20240104u32, &DateRepr::Date)
            .unwrap();
        assert_eq!(
            dates,
            vec![DateValue::Date(NaiveDate::from_ymd_opt(2024, 1, 4).unwrap())]
        );

        let datetimes = calendar
            .dates_in_range_as("cn", 20240104u32, 20240104u32, &DateRepr::DateTime)
            .unwrap();
        assert_eq!(datetimes, vec![DateValue::DateTime(at(2024, 1, 4, 0, 0))]);

        let text = calendar
            .dates_in_range_as(
                "cn",
                20240104u32,
                20240104u32,
                &DateRepr::Formatted("%Y/%m/%d".to_string()),
            )
            .unwrap();
        assert_eq!(text, vec![DateValue::Text("2024/01/04".to_string())]);
    }

    // ── Sessions ─────────────────────────────────────────────────────────────

    #[test]
    fn test_session_boundary_lookup() {
        let mut calendar = calendar();
        assert_eq!(calendar.session_boundary("cn").unwrap(), SessionBoundary::cn());
        assert!(matches!(
            calendar.session_boundary("us"),
            Err(CalendarError::UnknownMarket(_))
        ));

        let boundary = SessionBoundary::new(
            chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        )
        .unwrap();
        calendar.set_session_boundary("us", boundary);
        assert_eq!(calendar.session_boundary("us").unwrap(), boundary);
    }

    #[test]
    fn test_natural_window_of_trading_date() {
        let calendar = calendar();
        let window = calendar.trading_date_to_natural_window("cn", 20240108u32).unwrap();
        assert_eq!(window.trading_date, td(20240108));
        assert_eq!(window.start, at(2024, 1, 5, 18, 0));
        assert_eq!(window.end, at(2024, 1, 8, 18, 0));

        // Friday night session belongs to Monday
        assert!(window.contains(at(2024, 1, 5, 21, 0)));
        assert!(window.contains(at(2024, 1, 8, 9, 0)));
        assert!(!window.contains(at(2024, 1, 8, 18, 0)));
    }

    #[test]
    fn test_natural_window_of_holiday() {
        let calendar = calendar();
        let window = calendar.trading_date_to_natural_window("cn", "2024-01-07").unwrap();
        assert_eq!(window.trading_date, td(20240105));
        assert_eq!(window.start, at(2024, 1, 4, 18, 0));
    }

    #[test]
    fn test_natural_window_of_earliest_date_is_empty() {
        let calendar = calendar();
        let window = calendar.trading_date_to_natural_window("cn", 20240102u32).unwrap();
        assert!(window.is_empty());
    }

    #[test]
    fn test_current_trading_date() {
        let calendar = calendar();
        // Day session keeps its own date
        assert_eq!(
            calendar.current_trading_date("cn", at(2024, 1, 5, 10, 0)).unwrap(),
            td(20240105)
        );
        // Friday night goes to Monday
        assert_eq!(
            calendar.current_trading_date("cn", at(2024, 1, 5, 21, 0)).unwrap(),
            td(20240108)
        );
        // After midnight on Saturday still Monday
        assert_eq!(
            calendar.current_trading_date("cn", at(2024, 1, 6, 1, 0)).unwrap(),
            td(20240108)
        );
        // Tuesday night goes to Wednesday
        assert_eq!(
            calendar.current_trading_date("cn", at(2024, 1, 9, 22, 30)).unwrap(),
            td(20240110)
        );
    }
}
