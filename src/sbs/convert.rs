//! # Raw Value Conversions
//!
//! Unit and scale conversions for SBS word registers.

use crate::constants::{KELVIN_OFFSET, SBS_DATE_EPOCH_YEAR};
use chrono::NaiveDate;
use std::fmt;

/// Converts a temperature in 0.1 K to degrees Celsius.
pub fn deci_kelvin_to_celsius(raw: u16) -> f64 {
    (f64::from(raw) * 0.1) - KELVIN_OFFSET
}

/// Reinterprets a raw word as a two's-complement value.
pub fn as_signed(raw: u16) -> i16 {
    raw as i16
}

/// Packed manufacture date: `(year - 1980) << 9 | month << 5 | day`.
///
/// Components are extracted as-is. A month of 0 or 15, or a day of 0, is a
/// perfectly representable `DateCode`; use [`DateCode::to_date`] to check
/// whether it names a real calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCode {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl DateCode {
    pub fn from_raw(raw: u16) -> Self {
        DateCode {
            year: SBS_DATE_EPOCH_YEAR + (raw >> 9),
            month: ((raw >> 5) & 0x0F) as u8,
            day: (raw & 0x1F) as u8,
        }
    }

    /// Calendar view of the code, `None` if it is not a valid date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
    }
}

impl From<u16> for DateCode {
    fn from(raw: u16) -> Self {
        DateCode::from_raw(raw)
    }
}

impl fmt::Display for DateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}.{:02}", self.year, self.month, self.day)
    }
}
