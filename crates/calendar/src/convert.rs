//! Integer encodings of dates and times.
//!
//! | Digits | Layout | Example |
//! |--------|--------|---------|
//! | 8  | `YYYYMMDD`          | `20240105` |
//! | 14 | `YYYYMMDDhhmmss`    | `20240105093000` |
//! | 17 | `YYYYMMDDhhmmssSSS` | `20240105093000500` |
//! | 9  | `hhmmssSSS` (time only) | `93000500` |
//!
//! Sub-millisecond precision is truncated when encoding.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::errors::{CalendarError, Result};

const INT8_MIN: i64 = 10_000_000;
const INT8_MAX: i64 = 99_999_999;
const INT14_MIN: i64 = 10_000_000_000_000;
const INT14_MAX: i64 = 99_999_999_999_999;
const INT17_MIN: i64 = 10_000_000_000_000_000;
const INT17_MAX: i64 = 99_999_999_999_999_999;

/// Years that fit the 8-digit layout.
const MIN_YEAR: u32 = 1_000;
const MAX_YEAR: u32 = 9_999;

// ── Dates ────────────────────────────────────────────────────────────────────

pub fn date_to_int8(date: NaiveDate) -> Result<u32> {
    let year = u32::try_from(date.year())
        .ok()
        .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
        .ok_or_else(|| {
            CalendarError::InvalidDate(format!(
                "{} is outside years {}..={}",
                date, MIN_YEAR, MAX_YEAR
            ))
        })?;
    Ok(year * 10_000 + date.month() * 100 + date.day())
}

pub fn int8_to_date(value: i64) -> Result<NaiveDate> {
    if !(INT8_MIN..=INT8_MAX).contains(&value) {
        return Err(invalid(value));
    }
    let (year, rest) = (value / 10_000, value % 10_000);
    let (month, day) = (rest / 100, rest % 100);
    ymd(year, month, day).ok_or_else(|| invalid(value))
}

// ── Date-times ───────────────────────────────────────────────────────────────

pub fn datetime_to_int14(dt: NaiveDateTime) -> Result<i64> {
    Ok(date_to_int8(dt.date())? as i64 * 1_000_000
        + dt.hour() as i64 * 10_000
        + dt.minute() as i64 * 100
        + dt.second() as i64)
}

pub fn int14_to_datetime(value: i64) -> Result<NaiveDateTime> {
    let date = int8_to_date(value / 1_000_000).map_err(|_| invalid(value))?;
    let time = hms_milli(value % 1_000_000 * 1_000).ok_or_else(|| invalid(value))?;
    Ok(date.and_time(time))
}

pub fn datetime_to_int17(dt: NaiveDateTime) -> Result<i64> {
    Ok(datetime_to_int14(dt)? * 1_000 + millis(dt.time()) as i64)
}

pub fn int17_to_datetime(value: i64) -> Result<NaiveDateTime> {
    let date = int8_to_date(value / 1_000_000_000).map_err(|_| invalid(value))?;
    let time = hms_milli(value % 1_000_000_000).ok_or_else(|| invalid(value))?;
    Ok(date.and_time(time))
}

/// Decode an 8, 14 or 17 digit integer, picking the layout from its size.
///
/// ```
/// use quantkit_calendar::convert::int_to_datetime;
///
/// let dt = int_to_datetime(20240105).unwrap();
/// assert_eq!(dt.to_string(), "2024-01-05 00:00:00");
///
/// let dt = int_to_datetime(20240105093000).unwrap();
/// assert_eq!(dt.to_string(), "2024-01-05 09:30:00");
///
/// assert!(int_to_datetime(202401).is_err());
/// ```
pub fn int_to_datetime(value: i64) -> Result<NaiveDateTime> {
    match value {
        INT8_MIN..=INT8_MAX => Ok(int8_to_date(value)?.and_time(NaiveTime::default())),
        INT14_MIN..=INT14_MAX => int14_to_datetime(value),
        INT17_MIN..=INT17_MAX => int17_to_datetime(value),
        _ => Err(CalendarError::InvalidDate(format!(
            "expected an 8, 14 or 17 digit integer, got {}",
            value
        ))),
    }
}

// ── Times ────────────────────────────────────────────────────────────────────

pub fn time_to_int9(time: NaiveTime) -> u32 {
    time.hour() * 10_000_000 + time.minute() * 100_000 + time.second() * 1_000 + millis(time)
}

pub fn int9_to_time(value: i64) -> Result<NaiveTime> {
    if !(0..1_000_000_000).contains(&value) {
        return Err(invalid(value));
    }
    hms_milli(value).ok_or_else(|| invalid(value))
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn ymd(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

/// `hhmmssSSS` to a time.
fn hms_milli(value: i64) -> Option<NaiveTime> {
    let (hour, rest) = (value / 10_000_000, value % 10_000_000);
    let (minute, rest) = (rest / 100_000, rest % 100_000);
    let (second, milli) = (rest / 1_000, rest % 1_000);
    NaiveTime::from_hms_milli_opt(
        u32::try_from(hour).ok()?,
        u32::try_from(minute).ok()?,
        u32::try_from(second).ok()?,
        u32::try_from(milli).ok()?,
    )
}

fn millis(time: NaiveTime) -> u32 {
    (time.nanosecond() / 1_000_000).min(999)
}

fn invalid(value: i64) -> CalendarError {
    CalendarError::InvalidDate(value.to_string())
}
