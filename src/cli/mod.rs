//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod budget;
pub mod category;
pub mod expense;
pub mod lend;
pub mod report;

pub use backup::{handle_backup_command, BackupCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use lend::{handle_lend_command, LendCommands};
pub use report::{handle_report_command, ReportCommands};

use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::MonthKey;

/// Parse an optional `YYYY-MM` argument, defaulting to the current month
pub(crate) fn month_or_current(month: Option<&str>) -> LedgerResult<MonthKey> {
    match month {
        Some(s) => MonthKey::parse(s).map_err(|e| LedgerError::Validation(e.to_string())),
        None => Ok(MonthKey::current()),
    }
}

/// Parse an entry ID argument such as `exp-3` or `3`
pub(crate) fn parse_id<T: FromStr>(raw: &str, what: &str) -> LedgerResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| LedgerError::Validation(format!("Invalid {} ID: {}", what, raw)))
}

/// Parse a `YYYY-MM-DD` argument
pub(crate) fn parse_date(raw: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::Validation(format!("Invalid date (expected YYYY-MM-DD): {}", raw)))
}
