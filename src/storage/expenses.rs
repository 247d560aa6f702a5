//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::LedgerError;
use crate::models::{Expense, ExpenseDraft, ExpenseId, MonthKey};

use super::file_io::{read_json, write_json_atomic};
use super::poisoned;

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct ExpenseData {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    expenses: Vec<Expense>,
}

#[derive(Debug, Default)]
struct ExpenseState {
    next_id: u64,
    rows: BTreeMap<ExpenseId, Expense>,
}

/// Newest first: date descending, later IDs first within a day
fn newest_first(a: &Expense, b: &Expense) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then(b.id.cmp(&a.id))
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    state: RwLock<ExpenseState>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(ExpenseState::default()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: ExpenseData = read_json(&self.path)?;
        let mut state = self.state.write().map_err(poisoned)?;

        state.rows = file_data
            .expenses
            .into_iter()
            .map(|e| (e.id, e))
            .collect();
        let floor = state.rows.keys().next_back().map_or(0, |id| id.get());
        state.next_id = file_data.next_id.max(floor);

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let state = self.state.read().map_err(poisoned)?;

        let mut expenses: Vec<_> = state.rows.values().cloned().collect();
        expenses.sort_by(newest_first);

        let file_data = ExpenseData {
            next_id: state.next_id,
            expenses,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, LedgerError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.rows.get(&id).cloned())
    }

    /// Get all expenses, newest first
    pub fn get_all(&self) -> Result<Vec<Expense>, LedgerError> {
        self.filtered(|_| true)
    }

    /// Get the expenses dated within a calendar month, newest first
    pub fn get_by_month(&self, month: MonthKey) -> Result<Vec<Expense>, LedgerError> {
        self.filtered(|e| month.contains(e.date))
    }

    /// Get expenses in a date range (inclusive), newest first
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, LedgerError> {
        self.filtered(|e| e.date >= start && e.date <= end)
    }

    fn filtered<F>(&self, keep: F) -> Result<Vec<Expense>, LedgerError>
    where
        F: Fn(&Expense) -> bool,
    {
        let state = self.state.read().map_err(poisoned)?;
        let mut expenses: Vec<_> = state.rows.values().filter(|e| keep(e)).cloned().collect();
        expenses.sort_by(newest_first);
        Ok(expenses)
    }

    /// Insert a new expense under a freshly allocated ID
    pub fn insert(&self, draft: ExpenseDraft) -> Result<Expense, LedgerError> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.next_id += 1;
        let expense = Expense::from_draft(ExpenseId::new(state.next_id), draft);
        state.rows.insert(expense.id, expense.clone());
        Ok(expense)
    }

    /// Insert or replace an expense under its existing ID
    pub fn upsert(&self, expense: Expense) -> Result<(), LedgerError> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.next_id = state.next_id.max(expense.id.get());
        state.rows.insert(expense.id, expense);
        Ok(())
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> Result<bool, LedgerError> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(state.rows.remove(&id).is_some())
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, LedgerError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseInput, Money};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        (temp_dir, repo)
    }

    fn draft(date: &str, category: &str, amount: &str) -> ExpenseDraft {
        let today = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        ExpenseDraft::from_input(&ExpenseInput::new(category, amount).date(date), today).unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let expense = repo.insert(draft("2024-05-03", "Food", "200")).unwrap();

        assert_eq!(expense.id, ExpenseId::new(1));
        let fetched = repo.get(expense.id).unwrap().unwrap();
        assert_eq!(fetched.amount, Money::from_cents(20000));
    }

    #[test]
    fn test_newest_first_ordering() {
        let (_temp_dir, repo) = create_test_repo();
        let a = repo.insert(draft("2024-05-03", "Food", "1")).unwrap();
        let b = repo.insert(draft("2024-05-10", "Food", "2")).unwrap();
        let c = repo.insert(draft("2024-05-03", "Food", "3")).unwrap();

        let ids: Vec<_> = repo.get_all().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![b.id, c.id, a.id]);
    }

    #[test]
    fn test_month_and_range_filters() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(draft("2024-04-30", "Food", "1")).unwrap();
        repo.insert(draft("2024-05-01", "Food", "2")).unwrap();
        repo.insert(draft("2024-05-31", "Food", "3")).unwrap();
        repo.insert(draft("2023-05-15", "Food", "4")).unwrap();

        let may = MonthKey::new(2024, 5).unwrap();
        assert_eq!(repo.get_by_month(may).unwrap().len(), 2);

        let start = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(repo.get_by_date_range(start, end).unwrap().len(), 2);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let expense = repo.insert(draft("2024-05-03", "Food", "1")).unwrap();

        assert!(repo.delete(expense.id).unwrap());
        assert!(!repo.delete(expense.id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload_keeps_counter() {
        let (temp_dir, repo) = create_test_repo();
        let first = repo.insert(draft("2024-05-03", "Food", "1")).unwrap();
        repo.insert(draft("2024-05-04", "Food", "2")).unwrap();
        repo.delete(ExpenseId::new(2)).unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(first.id).unwrap().unwrap().category, "Food");

        let next = repo2.insert(draft("2024-05-05", "Food", "3")).unwrap();
        assert_eq!(next.id, ExpenseId::new(3));
    }
}
