//! Expense entry model
//!
//! Expenses carry their category and subcategory as plain text so that
//! renaming a catalog entry never rewrites history. The savings flag is
//! derived from the category text and is never accepted from callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::ids::ExpenseId;
use super::money::{Money, MoneyParseError};
use super::month::MonthKey;

/// Category name that marks an entry as a transfer to savings
pub const SAVINGS_CATEGORY: &str = "savings";

/// Whether a category name marks a savings transfer (case-insensitive)
pub fn is_savings_category(category: &str) -> bool {
    category.to_lowercase() == SAVINGS_CATEGORY
}

/// Payment state of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    /// Recorded but not yet paid
    #[default]
    Pending,
    /// Paid; counts toward spent
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Paid => write!(f, "Paid"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ExpenseValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            _ => Err(ExpenseValidationError::InvalidStatus(s.to_string())),
        }
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Calendar day of the expense
    pub date: NaiveDate,

    /// Category name at the time of entry
    pub category: String,

    /// Subcategory name at the time of entry
    #[serde(default)]
    pub subcategory: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Amount (never negative)
    pub amount: Money,

    #[serde(default)]
    pub payment_status: PaymentStatus,

    /// Derived from `category`; see [`is_savings_category`]
    #[serde(default)]
    pub is_savings: bool,
}

impl Expense {
    /// Build an expense from validated fields
    pub fn from_draft(id: ExpenseId, draft: ExpenseDraft) -> Self {
        let mut expense = Self {
            id,
            date: draft.date,
            category: String::new(),
            subcategory: None,
            description: String::new(),
            amount: Money::zero(),
            payment_status: PaymentStatus::Pending,
            is_savings: false,
        };
        expense.overwrite(draft);
        expense
    }

    /// Replace every user-editable field and recompute the savings flag
    pub fn overwrite(&mut self, draft: ExpenseDraft) {
        self.date = draft.date;
        self.is_savings = is_savings_category(&draft.category);
        self.category = draft.category;
        self.subcategory = draft.subcategory;
        self.description = draft.description;
        self.amount = draft.amount;
        self.payment_status = draft.payment_status;
    }

    /// The month this expense falls in
    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }

    /// Paid, non-savings: counts toward "spent"
    pub fn is_spent(&self) -> bool {
        self.payment_status == PaymentStatus::Paid && !self.is_savings
    }

    /// Pending, non-savings: counts toward "pending"
    pub fn is_pending(&self) -> bool {
        self.payment_status == PaymentStatus::Pending && !self.is_savings
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.category, self.amount)
    }
}

/// String-typed expense fields as they arrive from a form or command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseInput {
    /// `YYYY-MM-DD`; today when absent or blank
    #[serde(default)]
    pub date: Option<String>,

    /// Category picked from the catalog
    #[serde(default)]
    pub category: String,

    /// Free-text category; overrides `category` when non-blank
    #[serde(default)]
    pub custom_category: Option<String>,

    #[serde(default)]
    pub subcategory: Option<String>,

    /// Free-text subcategory; overrides `subcategory` when non-blank
    #[serde(default)]
    pub custom_subcategory: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Decimal amount, e.g. "12.50"
    #[serde(default)]
    pub amount: String,

    /// "Pending" or "Paid"; Pending when absent or blank
    #[serde(default)]
    pub payment_status: Option<String>,
}

impl ExpenseInput {
    pub fn new(category: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            amount: amount.into(),
            ..Self::default()
        }
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn custom_category(mut self, category: impl Into<String>) -> Self {
        self.custom_category = Some(category.into());
        self
    }

    pub fn custom_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.custom_subcategory = Some(subcategory.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.payment_status = Some(status.into());
        self
    }

    /// The category name this input resolves to (custom wins when non-blank)
    pub fn effective_category(&self) -> &str {
        non_blank(self.custom_category.as_deref()).unwrap_or_else(|| self.category.trim())
    }

    /// The subcategory name this input resolves to, if any
    pub fn effective_subcategory(&self) -> Option<&str> {
        non_blank(self.custom_subcategory.as_deref())
            .or_else(|| non_blank(self.subcategory.as_deref()))
    }

    /// Whether the subcategory came from the free-text field
    pub fn has_custom_subcategory(&self) -> bool {
        non_blank(self.custom_subcategory.as_deref()).is_some()
    }

    /// Whether the category came from the free-text field
    pub fn has_custom_category(&self) -> bool {
        non_blank(self.custom_category.as_deref()).is_some()
    }
}

/// Validated, typed expense fields ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub category: String,
    pub subcategory: Option<String>,
    pub description: String,
    pub amount: Money,
    pub payment_status: PaymentStatus,
}

impl ExpenseDraft {
    /// Validate a form, filling defaults for date (`today`) and status
    pub fn from_input(input: &ExpenseInput, today: NaiveDate) -> Result<Self, ExpenseValidationError> {
        let category = input.effective_category();
        if category.is_empty() {
            return Err(ExpenseValidationError::MissingCategory);
        }

        let amount =
            Money::parse_non_negative(&input.amount).map_err(ExpenseValidationError::Amount)?;

        let date = parse_entry_date(input.date.as_deref(), today)?;

        let payment_status = match non_blank(input.payment_status.as_deref()) {
            Some(status) => status.parse()?,
            None => PaymentStatus::Pending,
        };

        Ok(Self {
            date,
            category: category.to_string(),
            subcategory: input.effective_subcategory().map(str::to_string),
            description: input.description.trim().to_string(),
            amount,
            payment_status,
        })
    }
}

/// Parse an optional `YYYY-MM-DD` date, defaulting to `today` when blank
pub fn parse_entry_date(
    date: Option<&str>,
    today: NaiveDate,
) -> Result<NaiveDate, ExpenseValidationError> {
    match non_blank(date) {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| ExpenseValidationError::InvalidDate(s.to_string())),
        None => Ok(today),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Validation errors for entry forms
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseValidationError {
    #[error("Category is required")]
    MissingCategory,
    #[error("{0}")]
    Amount(MoneyParseError),
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
    #[error("Invalid payment status (expected Pending or Paid): {0}")]
    InvalidStatus(String),
}
