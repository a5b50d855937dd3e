//! The 3-byte packed date representation of seal headers and features.
//!
//! A date is written as the decimal number `MMDDYYYY` stored in three
//! big-endian bytes. The largest representable value is `0xFFFFFF`
//! (16777215), which covers every date the validation window admits
//! (`12312030` for 2030-12-31).

use seal_core::date::Date;
use snafu::{Backtrace, ResultExt, Snafu};

/// An error type for packed date conversions.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The packed decimal form does not fit into three bytes.
    #[snafu(display("date encoding failed: {} does not fit into three bytes", value))]
    DateEncodingFailed {
        /// the packed MMDDYYYY value
        value: u32,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The unpacked components do not name a valid date.
    #[snafu(display("packed bytes decode to an invalid date"))]
    InvalidDate {
        /// The underlying date validation error.
        #[snafu(backtrace)]
        source: seal_core::date::Error,
    },
}

type Result<T, E = Error> = std::result::Result<T, E>;

/// Pack a date into its three wire bytes.
pub fn encode_date(date: Date) -> Result<[u8; 3]> {
    let value = u32::from(date.month()) * 1_000_000
        + u32::from(date.day()) * 10_000
        + u32::from(date.year());
    if value > 0xFF_FFFF {
        return DateEncodingFailedSnafu { value }.fail();
    }
    Ok([(value >> 16) as u8, (value >> 8) as u8, value as u8])
}

/// Unpack three wire bytes into a date, validating the calendar rules.
pub fn decode_date(bytes: [u8; 3]) -> Result<Date> {
    let value =
        (u32::from(bytes[0]) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2]);
    let month = (value / 1_000_000) as u8;
    let day = (value / 10_000 % 100) as u8;
    let year = (value % 10_000) as u16;
    Date::new(year, month, day).context(InvalidDateSnafu)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_mmddyyyy_big_endian() {
        // 2022-02-09: MMDDYYYY = 02092022 = 0x1FEBF6
        let date = Date::new(2022, 2, 9).unwrap();
        assert_eq!(encode_date(date).unwrap(), [0x1F, 0xEB, 0xF6]);
    }

    #[test]
    fn unpacks_the_same_bytes() {
        let date = decode_date([0x1F, 0xEB, 0xF6]).unwrap();
        assert_eq!(date, Date::new(2022, 2, 9).unwrap());
    }

    #[test]
    fn round_trips_across_the_window() {
        let samples = [
            Date::new(1850, 1, 1).unwrap(),
            Date::new(1900, 2, 28).unwrap(),
            Date::new(2000, 2, 29).unwrap(),
            Date::new(2016, 12, 31).unwrap(),
            Date::new(2024, 2, 29).unwrap(),
            Date::new(2030, 12, 31).unwrap(),
        ];
        for date in samples {
            assert_eq!(decode_date(encode_date(date).unwrap()).unwrap(), date);
        }
    }

    #[test]
    fn rejects_non_calendar_bytes() {
        // 13312022 would be month 13
        let value: u32 = 13_312_022;
        let bytes = [(value >> 16) as u8, (value >> 8) as u8, value as u8];
        assert!(decode_date(bytes).is_err());
        // year 2031 is outside the window
        let value: u32 = 1_012_031;
        let bytes = [(value >> 16) as u8, (value >> 8) as u8, value as u8];
        assert!(decode_date(bytes).is_err());
    }
}
