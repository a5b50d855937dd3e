//! Calendar dates as carried in seal headers and date-valued features.
//!
//! The wire packs a date into three bytes (see the encoding crate);
//! this module owns the in-memory representation and the calendar rules:
//! years are restricted to the window fixed by the standard,
//! and day/month combinations must name a real Gregorian date.

use chrono::NaiveDate;
use snafu::{Backtrace, Snafu};
use std::fmt;
use std::str::FromStr;

/// The earliest year a seal date may carry.
pub const MIN_YEAR: u16 = 1850;
/// The latest year a seal date may carry.
pub const MAX_YEAR: u16 = 2030;

/// An error type for invalid date components.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The year is outside the window supported by the seal date encoding.
    #[snafu(display("year {} is out of the supported range {}-{}", year, MIN_YEAR, MAX_YEAR))]
    YearOutOfRange {
        /// the rejected year
        year: u16,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The components do not name a calendar date.
    #[snafu(display("{:04}-{:02}-{:02} is not a calendar date", year, month, day))]
    InvalidDate {
        /// the year component
        year: u16,
        /// the month component
        month: u8,
        /// the day component
        day: u8,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The textual form could not be parsed.
    #[snafu(display("invalid date text `{}`, expected YYYY-MM-DD", text))]
    ParseDate {
        /// the rejected input
        text: String,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
}

type Result<T, E = Error> = std::result::Result<T, E>;

/// A calendar date as printed on an identity document.
///
/// Instances are validated on construction:
/// the year lies in `1850..=2030` and the month/day pair
/// is checked against the Gregorian calendar,
/// including the leap-year rule for February.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    year: u16,
    month: u8,
    day: u8,
}

impl Date {
    /// Create a date, checking the year window and calendar validity.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return YearOutOfRangeSnafu { year }.fail();
        }
        if NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day)).is_none() {
            return InvalidDateSnafu { year, month, day }.fail();
        }
        Ok(Date { year, month, day })
    }

    /// The 4-digit year.
    pub fn year(self) -> u16 {
        self.year
    }

    /// The month, `1..=12`.
    pub fn month(self) -> u8 {
        self.month
    }

    /// The day of the month.
    pub fn day(self) -> u8 {
        self.day
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Parse a date in `YYYY-MM-DD` form.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, '-');
        let (y, m, d) = match (parts.next(), parts.next(), parts.next()) {
            (Some(y), Some(m), Some(d)) if y.len() == 4 && m.len() == 2 && d.len() == 2 => {
                (y, m, d)
            }
            _ => return ParseDateSnafu { text: s }.fail(),
        };
        let year: u16 = y.parse().map_err(|_| ParseDateSnafu { text: s }.build())?;
        let month: u8 = m.parse().map_err(|_| ParseDateSnafu { text: s }.build())?;
        let day: u8 = d.parse().map_err(|_| ParseDateSnafu { text: s }.build())?;
        Date::new(year, month, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_calendar_dates() {
        assert!(Date::new(2022, 2, 9).is_ok());
        assert!(Date::new(1850, 1, 1).is_ok());
        assert!(Date::new(2030, 12, 31).is_ok());
        // leap years
        assert!(Date::new(2020, 2, 29).is_ok());
        assert!(Date::new(2000, 2, 29).is_ok());
    }

    #[test]
    fn rejects_bad_components() {
        assert!(Date::new(1849, 12, 31).is_err());
        assert!(Date::new(2031, 1, 1).is_err());
        assert!(Date::new(2022, 0, 1).is_err());
        assert!(Date::new(2022, 13, 1).is_err());
        assert!(Date::new(2022, 4, 31).is_err());
        // 1900 is not a leap year, 2024 is
        assert!(Date::new(1900, 2, 29).is_err());
        assert!(Date::new(2024, 2, 29).is_ok());
        assert!(Date::new(2022, 2, 29).is_err());
    }

    #[test]
    fn parses_text_form() {
        let date: Date = "2022-02-09".parse().unwrap();
        assert_eq!(date, Date::new(2022, 2, 9).unwrap());
        assert_eq!(date.to_string(), "2022-02-09");
        assert!("2022-2-9".parse::<Date>().is_err());
        assert!("09.02.2022".parse::<Date>().is_err());
    }
}
