//! Day-granular calendar instants and the fixed date format.

use crate::domain::error::StockfeedError;
use chrono::NaiveDate;
use std::fmt;

/// Date format shared by source rows, CLI arguments and dataset filenames.
pub const DATE_FMT: &str = "%Y-%m-%d";

/// A calendar date as seconds since the Unix epoch, truncated to midnight.
///
/// Instants from different sources are directly comparable; ordering is the
/// integral one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i64);

impl Instant {
    /// Parse a date in `YYYY-MM-DD` form.
    ///
    /// Exactly four year digits and two month/day digits are accepted.
    /// Wrong separators, extra characters and calendrically invalid dates
    /// are all `InvalidDate`; a bad date is never rolled over into a valid
    /// one.
    pub fn parse(text: &str) -> Result<Self, StockfeedError> {
        let invalid = || StockfeedError::InvalidDate {
            text: text.to_string(),
        };

        let bytes = text.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shaped {
            return Err(invalid());
        }

        let date = NaiveDate::parse_from_str(text, DATE_FMT).map_err(|_| invalid())?;
        Ok(Self::from_date(date))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
        Self(midnight.and_utc().timestamp())
    }

    /// Seconds since the Unix epoch at midnight of the date.
    pub fn timestamp(&self) -> i64 {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        chrono::DateTime::from_timestamp(self.0, 0)
            .expect("day-granular instants are in range")
            .date_naive()
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date().format(DATE_FMT))
    }
}
