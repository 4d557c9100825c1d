//! Quantkit Calendar Crate
//!
//! Trading calendars for markets whose trading day does not line up with the
//! calendar day (night sessions that open the evening before).
//!
//! # Overview
//!
//! - [`TradingDate`] - a date stored as its `YYYYMMDD` integer
//! - [`TradingCalendar`] - sorted trading dates per market with previous /
//!   next / range queries and natural-time session windows
//! - [`SessionBoundary`] - the day-session limits of a market (`cn`: 06:00 to 18:00)
//! - [`CalendarSeed`] - where trading dates come from ([`CsvCalendarSeed`])
//! - [`convert`] - 8, 9, 14 and 17 digit integer encodings of dates and times
//!
//! # Example
//!
//! ```
//! use quantkit_calendar::TradingCalendar;
//!
//! let mut calendar = TradingCalendar::new();
//! calendar.set("cn", [20240104u32, 20240105, 20240108]).unwrap();
//!
//! let next = calendar.next_trading_date("cn", "2024-01-05", 1).unwrap();
//! assert_eq!(next.as_int(), 20240108);
//! ```

mod calendar;
pub mod convert;
mod date;
pub mod errors;
mod seed;
mod session;

pub use calendar::{DateRepr, DateValue, TradingCalendar};
pub use date::{parse_date, IntoTradingDate, TradingDate};
pub use errors::{CalendarError, Result};
pub use seed::{CalendarSeed, CsvCalendarSeed};
pub use session::{NaturalWindow, SessionBoundary, CN_MARKET};
