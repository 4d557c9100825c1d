//! Error types for the calendar crate.

use thiserror::Error;

/// Errors raised by calendar construction and date queries.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// Queries were made for a market whose dates were never set.
    #[error("No trading calendar bound for market '{0}'")]
    CalendarNotBound(String),

    /// `set` was called with no dates.
    #[error("Trading calendar for market '{0}' would be empty")]
    EmptyCalendar(String),

    /// An argument outside the accepted domain, e.g. `n = 0`.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A value that does not denote a valid date or time.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// No session boundary is configured for the market.
    #[error("Unknown market: {0}")]
    UnknownMarket(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for calendar operations.
pub type Result<T> = std::result::Result<T, CalendarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CalendarError::CalendarNotBound("cn".to_string()).to_string(),
            "No trading calendar bound for market 'cn'"
        );
        assert_eq!(
            CalendarError::InvalidDate("20230230".to_string()).to_string(),
            "Invalid date: 20230230"
        );
    }
}
