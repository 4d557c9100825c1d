//! Sources of trading dates.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};

use crate::date::parse_date;
use crate::errors::{CalendarError, Result};

/// Supplies the trading dates of one market.
pub trait CalendarSeed {
    fn load(&self) -> Result<Vec<NaiveDate>>;
}

impl CalendarSeed for Vec<NaiveDate> {
    fn load(&self) -> Result<Vec<NaiveDate>> {
        Ok(self.clone())
    }
}

/// Reads trading dates from one column of a CSV file with a header row.
///
/// Blank cells are skipped, so one file can hold calendars of different
/// lengths side by side (one column per exchange).
#[derive(Debug, Clone)]
pub struct CsvCalendarSeed {
    path: PathBuf,
    column: String,
}

impl CsvCalendarSeed {
    pub fn new(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            column: column.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

impl CalendarSeed for CsvCalendarSeed {
    fn load(&self) -> Result<Vec<NaiveDate>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_path(&self.path)?;

        let index = reader
            .headers()?
            .iter()
            .position(|header| header == self.column)
            .ok_or_else(|| {
                CalendarError::InvalidArgument(format!(
                    "column '{}' not found in {}",
                    self.column,
                    self.path.display()
                ))
            })?;

        let mut dates = Vec::new();
        for record in reader.records() {
            let record = record?;
            match record.get(index) {
                Some(cell) if !cell.is_empty() => dates.push(parse_date(cell)?),
                _ => {}
            }
        }

        log::debug!(
            "Read {} dates from column {} of {}",
            dates.len(),
            self.column,
            self.path.display()
        );
        Ok(dates)
    }
}
