//! Aggregation engine
//!
//! Pure reads that roll ledger entries up into the figures the dashboard
//! shows. Nothing is cached; every call rescans the store.
//!
//! Monthly figures only count entries dated inside the month. Lend and borrow
//! totals are the exception: they cover the whole history regardless of the
//! month being viewed.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::LedgerResult;
use crate::models::{Expense, LendBorrow, LendBorrowKind, Money, MonthKey};
use crate::storage::Storage;

/// Paid spending in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
}

/// Paid spending in one subcategory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryTotal {
    pub subcategory: String,
    pub amount: Money,
}

/// Sum of paid, non-savings expenses
pub fn spent(expenses: &[Expense]) -> Money {
    expenses.iter().filter(|e| e.is_spent()).map(|e| e.amount).sum()
}

/// Sum of pending, non-savings expenses
pub fn pending(expenses: &[Expense]) -> Money {
    expenses
        .iter()
        .filter(|e| e.is_pending())
        .map(|e| e.amount)
        .sum()
}

/// Sum of savings transfers, whatever their payment status
pub fn savings(expenses: &[Expense]) -> Money {
    expenses
        .iter()
        .filter(|e| e.is_savings)
        .map(|e| e.amount)
        .sum()
}

/// Paid spending per category, largest first (ties by name)
pub fn by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, Money> = BTreeMap::new();
    for expense in expenses.iter().filter(|e| e.is_spent()) {
        *totals.entry(expense.category.as_str()).or_default() += expense.amount;
    }

    let mut rows: Vec<_> = totals
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount,
        })
        .collect();
    rows.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    rows
}

/// Paid spending per subcategory, largest first. Entries without a
/// subcategory are left out.
pub fn by_subcategory(expenses: &[Expense]) -> Vec<SubcategoryTotal> {
    let mut totals: BTreeMap<&str, Money> = BTreeMap::new();
    for expense in expenses.iter().filter(|e| e.is_spent()) {
        match expense.subcategory.as_deref() {
            Some(sub) if !sub.is_empty() => *totals.entry(sub).or_default() += expense.amount,
            _ => {}
        }
    }

    let mut rows: Vec<_> = totals
        .into_iter()
        .map(|(subcategory, amount)| SubcategoryTotal {
            subcategory: subcategory.to_string(),
            amount,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.subcategory.cmp(&b.subcategory))
    });
    rows
}

/// Sum of lend/borrow entries of one kind
pub fn total_of_kind(entries: &[LendBorrow], kind: LendBorrowKind) -> Money {
    entries
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| e.amount)
        .sum()
}

/// Storage-backed aggregation queries
pub struct AggregationEngine<'a> {
    storage: &'a Storage,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn month_expenses(&self, month: MonthKey) -> LedgerResult<Vec<Expense>> {
        self.storage.expenses.get_by_month(month)
    }

    pub fn spent(&self, month: MonthKey) -> LedgerResult<Money> {
        Ok(spent(&self.month_expenses(month)?))
    }

    pub fn pending(&self, month: MonthKey) -> LedgerResult<Money> {
        Ok(pending(&self.month_expenses(month)?))
    }

    pub fn savings(&self, month: MonthKey) -> LedgerResult<Money> {
        Ok(savings(&self.month_expenses(month)?))
    }

    /// Budget minus the month's spending; negative when over budget
    pub fn remaining(&self, month: MonthKey) -> LedgerResult<Money> {
        Ok(self.storage.budget.amount()? - self.spent(month)?)
    }

    pub fn by_category(&self, month: MonthKey) -> LedgerResult<Vec<CategoryTotal>> {
        Ok(by_category(&self.month_expenses(month)?))
    }

    pub fn by_subcategory(&self, month: MonthKey) -> LedgerResult<Vec<SubcategoryTotal>> {
        Ok(by_subcategory(&self.month_expenses(month)?))
    }

    /// Savings across every month
    pub fn total_savings_all_time(&self) -> LedgerResult<Money> {
        Ok(savings(&self.storage.expenses.get_all()?))
    }

    /// Everything ever lent, independent of any month
    pub fn total_lent(&self) -> LedgerResult<Money> {
        Ok(total_of_kind(
            &self.storage.lend_borrow.get_all()?,
            LendBorrowKind::Lend,
        ))
    }

    /// Everything ever borrowed, independent of any month
    pub fn total_borrowed(&self) -> LedgerResult<Money> {
        Ok(total_of_kind(
            &self.storage.lend_borrow.get_all()?,
            LendBorrowKind::Borrow,
        ))
    }
}
