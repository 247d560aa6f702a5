//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Sums over many entries stay exact, which the dashboard relies on.
//! Arithmetic saturates at the i64 bounds instead of overflowing.
//!
//! In JSON an amount is a decimal number of currency units (`12.5` is
//! $12.50), both in the data files and in `--json` report output.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;

/// Largest whole-unit amount accepted from user input or data files
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_ledger::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "10.50", "-10.50", "$10.50", "+10", ".5" and "10.".
    /// Fractions longer than two digits are rounded half-up to the cent.
    /// Magnitudes above [`MAX_AMOUNT_UNITS`] are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let too_large = || MoneyParseError::TooLarge(trimmed.to_string());
        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| too_large())?
        };
        if units > MAX_AMOUNT_UNITS {
            return Err(too_large());
        }

        let digits: Vec<i64> = fraction
            .chars()
            .take(3)
            .map(|c| i64::from(c as u8 - b'0'))
            .collect();
        let mut cents = digits.first().copied().unwrap_or(0) * 10 + digits.get(1).copied().unwrap_or(0);
        if digits.get(2).copied().unwrap_or(0) >= 5 {
            cents += 1;
        }

        let total = units * 100 + cents;
        if total > MAX_AMOUNT_UNITS * 100 {
            return Err(too_large());
        }

        Ok(Self(if negative { -total } else { total }))
    }

    /// Parse an amount that must not be negative (entry and budget amounts)
    pub fn parse_non_negative(s: &str) -> Result<Self, MoneyParseError> {
        let amount = Self::parse(s)?;
        if amount.is_negative() {
            return Err(MoneyParseError::Negative(s.trim().to_string()));
        }
        Ok(amount)
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }

    /// Plain decimal rendering without a symbol ("1234.50")
    pub fn to_decimal_string(&self) -> String {
        self.format_with_symbol("")
    }

    fn from_whole_units(units: i64) -> Option<Self> {
        (-MAX_AMOUNT_UNITS..=MAX_AMOUNT_UNITS)
            .contains(&units)
            .then(|| Self(units * 100))
    }

    fn from_decimal_units(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        let limit = (MAX_AMOUNT_UNITS * 100) as f64;
        (cents.is_finite() && cents.abs() <= limit).then(|| Self(cents as i64))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an amount in currency units such as 12.5 or \"12.50\"")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
        Money::from_decimal_units(value)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
        Money::from_whole_units(value)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
        i64::try_from(value)
            .ok()
            .and_then(Money::from_whole_units)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Money, E> {
        Money::parse(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("Amount is required")]
    Empty,
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),
    #[error("Amount cannot be negative: {0}")]
    Negative(String),
    #[error("Amount is too large: {0}")]
    TooLarge(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
        assert_eq!(Money::from_cents(-5).to_decimal_string(), "-0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!([a, b].iter().sum::<Money>().cents(), 1500);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("+10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("7.").unwrap().cents(), 700);
        assert_eq!(Money::parse(" 0.05 ").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_rounds_extra_digits() {
        assert_eq!(Money::parse("10.555").unwrap().cents(), 1056);
        assert_eq!(Money::parse("10.554").unwrap().cents(), 1055);
        assert_eq!(Money::parse("0.999").unwrap().cents(), 100);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1e3").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_bounds_magnitude() {
        let max = Money::parse("1000000000000").unwrap();
        assert_eq!(max.cents(), MAX_AMOUNT_UNITS * 100);
        assert!(matches!(
            Money::parse("1000000000000.01"),
            Err(MoneyParseError::TooLarge(_))
        ));
        assert!(matches!(
            Money::parse("50000000000000000"),
            Err(MoneyParseError::TooLarge(_))
        ));
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::TooLarge(_))
        ));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX - 10);
        assert_eq!((huge + huge).cents(), i64::MAX);
        assert_eq!([huge, huge, huge].iter().sum::<Money>().cents(), i64::MAX);
        assert_eq!((-huge - huge).cents(), i64::MIN);

        let mut total = huge;
        total += Money::from_cents(100);
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!((-Money::from_cents(i64::MIN)).cents(), i64::MAX);
    }

    #[test]
    fn test_json_uses_decimal_units() {
        assert_eq!(serde_json::to_string(&Money::from_cents(1250)).unwrap(), "12.5");
        assert_eq!(serde_json::to_string(&Money::from_cents(30000)).unwrap(), "300.0");
        assert_eq!(serde_json::to_string(&Money::from_cents(-5)).unwrap(), "-0.05");

        let parsed: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(parsed.cents(), 1250);
        let parsed: Money = serde_json::from_str("0.1").unwrap();
        assert_eq!(parsed.cents(), 10);
        let parsed: Money = serde_json::from_str("300").unwrap();
        assert_eq!(parsed.cents(), 30000);
        let parsed: Money = serde_json::from_str("\"19.99\"").unwrap();
        assert_eq!(parsed.cents(), 1999);
    }

    #[test]
    fn test_json_rejects_out_of_range() {
        assert!(serde_json::from_str::<Money>("1e15").is_err());
        assert!(serde_json::from_str::<Money>("50000000000000000").is_err());
        assert!(serde_json::from_str::<Money>("\"abc\"").is_err());
        assert!(serde_json::from_str::<Money>("true").is_err());
    }

    #[test]
    fn test_parse_non_negative() {
        assert_eq!(Money::parse_non_negative("0").unwrap(), Money::zero());
        assert!(matches!(
            Money::parse_non_negative("-1"),
            Err(MoneyParseError::Negative(_))
        ));
    }
}
