//! Dashboard report
//!
//! Everything the monthly overview shows, computed in one pass over the
//! store for the selected month.

use serde::Serialize;

use super::aggregate::{self, CategoryTotal, SubcategoryTotal};
use crate::error::LedgerResult;
use crate::models::{LendBorrow, LendBorrowKind, Money, MonthKey};
use crate::services::expense::{group_by_date, ExpensesOnDate};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Figures for the month before the selected one
///
/// No budget history is kept, so the current budget stands in for the
/// previous month's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviousMonth {
    pub month: MonthKey,
    pub budget: Money,
    pub spent: Money,
    pub savings: Money,
    pub remaining: Money,
}

/// Monthly overview
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub month: MonthKey,
    pub budget: Money,
    pub spent: Money,
    pub pending: Money,
    pub savings: Money,
    pub remaining: Money,
    pub over_budget: bool,
    pub by_category: Vec<CategoryTotal>,
    pub by_subcategory: Vec<SubcategoryTotal>,
    pub previous: PreviousMonth,
    pub total_savings_all_time: Money,
    /// Whole-history total, not limited to `month`
    pub total_lends: Money,
    /// Whole-history total, not limited to `month`
    pub total_borrows: Money,
    pub lend_borrow: Vec<LendBorrow>,
    pub expenses: Vec<ExpensesOnDate>,
    pub available_months: Vec<MonthKey>,
}

impl Dashboard {
    /// Generate the dashboard for `month`
    pub fn generate(storage: &Storage, month: MonthKey) -> LedgerResult<Self> {
        let budget = storage.budget.amount()?;
        let all_expenses = storage.expenses.get_all()?;

        let current: Vec<_> = all_expenses
            .iter()
            .filter(|e| month.contains(e.date))
            .cloned()
            .collect();
        let prev_month = month.prev();
        let previous: Vec<_> = all_expenses
            .iter()
            .filter(|e| prev_month.contains(e.date))
            .cloned()
            .collect();

        let spent = aggregate::spent(&current);
        let remaining = budget - spent;
        let prev_spent = aggregate::spent(&previous);

        let all_lend_borrow = storage.lend_borrow.get_all()?;

        Ok(Self {
            month,
            budget,
            spent,
            pending: aggregate::pending(&current),
            savings: aggregate::savings(&current),
            remaining,
            over_budget: remaining.is_negative(),
            by_category: aggregate::by_category(&current),
            by_subcategory: aggregate::by_subcategory(&current),
            previous: PreviousMonth {
                month: prev_month,
                budget,
                spent: prev_spent,
                savings: aggregate::savings(&previous),
                remaining: budget - prev_spent,
            },
            total_savings_all_time: aggregate::savings(&all_expenses),
            total_lends: aggregate::total_of_kind(&all_lend_borrow, LendBorrowKind::Lend),
            total_borrows: aggregate::total_of_kind(&all_lend_borrow, LendBorrowKind::Borrow),
            lend_borrow: all_lend_borrow
                .into_iter()
                .filter(|e| month.contains(e.date))
                .collect(),
            expenses: group_by_date(current),
            available_months: ExpenseService::new(storage).available_months()?,
        })
    }

    /// The `n` categories with the most paid spending
    pub fn top_categories(&self, n: usize) -> &[CategoryTotal] {
        &self.by_category[..n.min(self.by_category.len())]
    }
}
