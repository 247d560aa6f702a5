//! Expense service
//!
//! Provides business logic for expense entries: validation of string-typed
//! input, catalog side effects for free-text categories, CRUD, payment status
//! changes and the ledger queries used by reports.

use chrono::{Local, NaiveDate};
use tracing::info;

use super::category::CategoryService;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Expense, ExpenseDraft, ExpenseId, ExpenseInput, MonthKey, PaymentStatus,
};
use crate::storage::Storage;

/// Number of entries `recent` returns when no limit is given
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    today: NaiveDate,
}

/// Expenses sharing one calendar day
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExpensesOnDate {
    pub date: NaiveDate,
    pub expenses: Vec<Expense>,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service; entries without a date land on today
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            today: Local::now().date_naive(),
        }
    }

    /// Use `today` as the default date for undated entries
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Record a new expense
    ///
    /// A non-blank custom category is added to the catalog when missing. A
    /// non-blank custom subcategory is added under the entry's category when
    /// that category is in the catalog.
    pub fn record(&self, input: &ExpenseInput) -> LedgerResult<Expense> {
        let draft = self.validate(input)?;

        let categories = CategoryService::new(self.storage);
        if input.has_custom_category() {
            categories.resolve_or_create_category(&draft.category)?;
        }
        if input.has_custom_subcategory() {
            if let (Some(category), Some(sub)) = (
                categories.find_category(&draft.category)?,
                draft.subcategory.as_deref(),
            ) {
                categories.resolve_or_create_subcategory(category.id, sub)?;
            }
        }

        let expense = self.storage.expenses.insert(draft)?;
        self.storage.expenses.save()?;

        info!(
            id = %expense.id,
            date = %expense.date,
            category = %expense.category,
            amount = %expense.amount,
            "recorded expense"
        );
        Ok(expense)
    }

    /// Overwrite every field of an existing expense
    pub fn update(&self, id: ExpenseId, input: &ExpenseInput) -> LedgerResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;

        let draft = self.validate(input)?;
        expense.overwrite(draft);

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        info!(id = %expense.id, "updated expense");
        Ok(expense)
    }

    /// Delete an expense, returning what was removed
    pub fn delete(&self, id: ExpenseId) -> LedgerResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        info!(id = %id, "deleted expense");
        Ok(expense)
    }

    /// Change only the payment status of an expense
    pub fn set_payment_status(&self, id: ExpenseId, status: PaymentStatus) -> LedgerResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| LedgerError::expense_not_found(id.to_string()))?;

        if expense.payment_status == status {
            return Ok(expense);
        }

        let previous = expense.payment_status;
        expense.payment_status = status;
        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        info!(id = %id, from = %previous, to = %status, "changed payment status");
        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> LedgerResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Parse an ID string (`exp-12` or `12`) and look it up
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Expense>> {
        match identifier.trim().parse::<ExpenseId>() {
            Ok(id) => self.get(id),
            Err(_) => Ok(None),
        }
    }

    /// Expenses in a month, newest first
    pub fn list_for_month(&self, month: MonthKey) -> LedgerResult<Vec<Expense>> {
        self.storage.expenses.get_by_month(month)
    }

    /// Expenses between two dates inclusive, newest first
    pub fn list_between(&self, start: NaiveDate, end: NaiveDate) -> LedgerResult<Vec<Expense>> {
        if start > end {
            return Err(LedgerError::Validation(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }
        self.storage.expenses.get_by_date_range(start, end)
    }

    /// The most recent expenses across all months
    pub fn recent(&self, limit: Option<usize>) -> LedgerResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses.get_all()?;
        expenses.truncate(limit.unwrap_or(DEFAULT_RECENT_LIMIT));
        Ok(expenses)
    }

    /// A month's expenses grouped by day, newest day first
    pub fn grouped_by_date(&self, month: MonthKey) -> LedgerResult<Vec<ExpensesOnDate>> {
        Ok(group_by_date(self.list_for_month(month)?))
    }

    /// Distinct months that have expenses, newest first
    pub fn available_months(&self) -> LedgerResult<Vec<MonthKey>> {
        let mut months: Vec<MonthKey> = self
            .storage
            .expenses
            .get_all()?
            .iter()
            .map(Expense::month)
            .collect();
        months.sort_unstable_by(|a, b| b.cmp(a));
        months.dedup();
        Ok(months)
    }

    /// Count all expenses
    pub fn count(&self) -> LedgerResult<usize> {
        self.storage.expenses.count()
    }

    fn validate(&self, input: &ExpenseInput) -> LedgerResult<ExpenseDraft> {
        ExpenseDraft::from_input(input, self.today)
            .map_err(|e| LedgerError::Validation(e.to_string()))
    }
}

/// Group newest-first expenses into runs sharing a date
pub fn group_by_date(expenses: Vec<Expense>) -> Vec<ExpensesOnDate> {
    let mut groups: Vec<ExpensesOnDate> = Vec::new();
    for expense in expenses {
        match groups.last_mut() {
            Some(group) if group.date == expense.date => group.expenses.push(expense),
            _ => groups.push(ExpensesOnDate {
                date: expense.date,
                expenses: vec![expense],
            }),
        }
    }
    groups
}
