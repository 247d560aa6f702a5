//! Month keys
//!
//! A `MonthKey` is the `YYYY-MM` selector every aggregation is scoped by.
//! A date belongs to a month when its year and month match, which is the same
//! as the ISO date string starting with the key.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A calendar month (e.g., "2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // month is validated on construction, so day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The preceding month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Long display form, e.g. "May 2024"
    pub fn display_long(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// Short display form, e.g. "Jan 2025"
    pub fn display_short(&self) -> String {
        self.first_day().format("%b %Y").to_string()
    }

    /// Parse a `YYYY-MM` string
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let invalid = || MonthParseError::InvalidFormat(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.chars().all(|c| c.is_ascii_digit()) || !month.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthParseError {
    #[error("Invalid month format (expected YYYY-MM): {0}")]
    InvalidFormat(String),
    #[error("Month out of range: {0}")]
    InvalidMonth(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let key = MonthKey::parse("2024-05").unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month(), 5);
        assert_eq!(key.to_string(), "2024-05");
        assert_eq!(key.display_long(), "May 2024");
        assert_eq!(key.display_short(), "May 2024");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(MonthKey::parse("2024-5").is_err());
        assert!(MonthKey::parse("2024/05").is_err());
        assert!(MonthKey::parse("2024-13").is_err());
        assert!(MonthKey::parse("2024-00").is_err());
        assert!(MonthKey::parse("24-05").is_err());
        assert!(MonthKey::parse("2024-05-01").is_err());
    }

    #[test]
    fn test_contains() {
        let key = MonthKey::parse("2024-05").unwrap();
        assert!(key.contains(date(2024, 5, 1)));
        assert!(key.contains(date(2024, 5, 31)));
        assert!(!key.contains(date(2024, 6, 1)));
        assert!(!key.contains(date(2023, 5, 15)));
    }

    #[test]
    fn test_navigation_wraps_years() {
        let jan = MonthKey::new(2025, 1).unwrap();
        assert_eq!(jan.prev().to_string(), "2024-12");
        let jun = MonthKey::new(2024, 6).unwrap();
        assert_eq!(jun.prev().to_string(), "2024-05");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = MonthKey::parse("2023-12").unwrap();
        let b = MonthKey::parse("2024-01").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_serde_as_string() {
        let key = MonthKey::parse("2024-05").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-05\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
