//! Date type for reconciliation records.
//!
//! Provides a type-safe wrapper around `chrono::NaiveDate` with ISO 8601
//! parsing and serialisation, used for strike, trade and expiry dates.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around `chrono::NaiveDate`.
///
/// Serialises as an ISO 8601 string (`YYYY-MM-DD`), which is the wire form
/// of every date in confirmation and booking records.
///
/// # Examples
///
/// ```
/// use recon_core::types::Date;
///
/// let date = Date::from_ymd(2024, 1, 15).unwrap();
/// assert_eq!(date.to_string(), "2024-01-15");
///
/// let parsed: Date = "2024-01-15".parse().unwrap();
/// assert_eq!(date, parsed);
/// ```
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month and day components.
    ///
    /// # Errors
    ///
    /// Returns `DateError::InvalidDate` for impossible dates
    /// (e.g., February 30th).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from an ISO 8601 string (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns `DateError::ParseError` if the string is not a valid
    /// ISO 8601 date.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }

    /// Returns the year component.
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats as ISO 8601 (`YYYY-MM-DD`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ymd_valid() {
        let date = Date::from_ymd(2024, 6, 15).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_from_ymd_leap_year() {
        assert!(Date::from_ymd(2024, 2, 29).is_ok());
        assert!(Date::from_ymd(2023, 2, 29).is_err());
    }

    #[test]
    fn test_from_ymd_invalid() {
        let result = Date::from_ymd(2024, 2, 30);
        assert_eq!(
            result,
            Err(DateError::InvalidDate {
                year: 2024,
                month: 2,
                day: 30
            })
        );
    }

    #[test]
    fn test_parse_iso() {
        let date = Date::parse("2024-01-15").unwrap();
        assert_eq!(date, Date::from_ymd(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_rejects_non_iso() {
        assert!(Date::parse("15-JAN-2024").is_err());
        assert!(Date::parse("2024/01/15").is_err());
        assert!(Date::parse("Q2 2024").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let date = Date::from_ymd(2026, 1, 15).unwrap();
        let parsed: Date = date.to_string().parse().unwrap();
        assert_eq!(date, parsed);
    }

    #[test]
    fn test_ordering() {
        let earlier = Date::from_ymd(2024, 1, 1).unwrap();
        let later = Date::from_ymd(2027, 1, 1).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_serde_iso_string() {
        let date = Date::from_ymd(2024, 1, 15).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-01-15\"");

        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
