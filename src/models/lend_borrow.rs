//! Lend/borrow entry model
//!
//! Money lent to or borrowed from a counterparty. Kept apart from expenses
//! and totalled over the whole history rather than per month.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::expense::{parse_entry_date, ExpenseValidationError};
use super::ids::LendBorrowId;
use super::money::{Money, MoneyParseError};
use super::month::MonthKey;

/// Status given to new entries when none is supplied
pub const DEFAULT_LEND_BORROW_STATUS: &str = "Pending";

/// Direction of the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LendBorrowKind {
    /// Money given to the counterparty
    Lend,
    /// Money received from the counterparty
    Borrow,
}

impl fmt::Display for LendBorrowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lend => write!(f, "Lend"),
            Self::Borrow => write!(f, "Borrow"),
        }
    }
}

impl FromStr for LendBorrowKind {
    type Err = LendBorrowValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lend" | "lent" => Ok(Self::Lend),
            "borrow" | "borrowed" => Ok(Self::Borrow),
            _ => Err(LendBorrowValidationError::InvalidKind(s.to_string())),
        }
    }
}

/// A lend or borrow record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendBorrow {
    pub id: LendBorrowId,
    pub date: NaiveDate,

    /// Counterparty name
    pub name: String,

    pub amount: Money,

    #[serde(rename = "type")]
    pub kind: LendBorrowKind,

    #[serde(default)]
    pub description: String,

    /// Free-text status, "Pending" by default
    pub status: String,
}

impl LendBorrow {
    pub fn from_draft(id: LendBorrowId, draft: LendBorrowDraft) -> Self {
        Self {
            id,
            date: draft.date,
            name: draft.name,
            amount: draft.amount,
            kind: draft.kind,
            description: draft.description,
            status: draft.status,
        }
    }

    /// Replace every user-editable field
    pub fn overwrite(&mut self, draft: LendBorrowDraft) {
        let id = self.id;
        *self = Self::from_draft(id, draft);
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }
}

/// String-typed lend/borrow fields as they arrive from a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendBorrowInput {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: String,
    /// "Lend" or "Borrow"
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl LendBorrowInput {
    pub fn new(name: impl Into<String>, amount: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Validated lend/borrow fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LendBorrowDraft {
    pub date: NaiveDate,
    pub name: String,
    pub amount: Money,
    pub kind: LendBorrowKind,
    pub description: String,
    pub status: String,
}

impl LendBorrowDraft {
    pub fn from_input(
        input: &LendBorrowInput,
        today: NaiveDate,
    ) -> Result<Self, LendBorrowValidationError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(LendBorrowValidationError::MissingName);
        }

        let amount =
            Money::parse_non_negative(&input.amount).map_err(LendBorrowValidationError::Amount)?;
        let kind: LendBorrowKind = input.kind.parse()?;
        let date = parse_entry_date(input.date.as_deref(), today).map_err(|e| match e {
            ExpenseValidationError::InvalidDate(s) => LendBorrowValidationError::InvalidDate(s),
            other => LendBorrowValidationError::InvalidDate(other.to_string()),
        })?;

        Ok(Self {
            date,
            name: name.to_string(),
            amount,
            kind,
            description: input.description.trim().to_string(),
            status: normalize_status(input.status.as_deref()),
        })
    }
}

/// Trim a status, falling back to the default when blank
pub fn normalize_status(status: Option<&str>) -> String {
    status
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_LEND_BORROW_STATUS)
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LendBorrowValidationError {
    #[error("Counterparty name is required")]
    MissingName,
    #[error("{0}")]
    Amount(MoneyParseError),
    #[error("Invalid type (expected Lend or Borrow): {0}")]
    InvalidKind(String),
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    #[test]
    fn test_draft_from_input() {
        let input = LendBorrowInput::new(" Ravi ", "250", "lend").date("2024-04-02");
        let draft = LendBorrowDraft::from_input(&input, today()).unwrap();
        assert_eq!(draft.name, "Ravi");
        assert_eq!(draft.kind, LendBorrowKind::Lend);
        assert_eq!(draft.amount.cents(), 25000);
        assert_eq!(draft.status, "Pending");
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
    }

    #[test]
    fn test_draft_rejects_bad_input() {
        let bad_kind = LendBorrowInput::new("Ravi", "1", "gift");
        assert!(matches!(
            LendBorrowDraft::from_input(&bad_kind, today()),
            Err(LendBorrowValidationError::InvalidKind(_))
        ));

        let no_name = LendBorrowInput::new("", "1", "Borrow");
        assert_eq!(
            LendBorrowDraft::from_input(&no_name, today()),
            Err(LendBorrowValidationError::MissingName)
        );

        let bad_amount = LendBorrowInput::new("Ravi", "x", "Borrow");
        assert!(matches!(
            LendBorrowDraft::from_input(&bad_amount, today()),
            Err(LendBorrowValidationError::Amount(_))
        ));
    }

    #[test]
    fn test_overwrite_keeps_id() {
        let draft = LendBorrowDraft::from_input(&LendBorrowInput::new("A", "1", "Lend"), today())
            .unwrap();
        let mut entry = LendBorrow::from_draft(LendBorrowId::new(3), draft);

        let draft = LendBorrowDraft::from_input(
            &LendBorrowInput::new("B", "2", "Borrow").status("Returned"),
            today(),
        )
        .unwrap();
        entry.overwrite(draft);

        assert_eq!(entry.id, LendBorrowId::new(3));
        assert_eq!(entry.name, "B");
        assert_eq!(entry.kind, LendBorrowKind::Borrow);
        assert_eq!(entry.status, "Returned");
    }

    #[test]
    fn test_kind_serializes_under_type() {
        let draft = LendBorrowDraft::from_input(&LendBorrowInput::new("A", "1", "Lend"), today())
            .unwrap();
        let entry = LendBorrow::from_draft(LendBorrowId::new(1), draft);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "Lend");
    }
}
