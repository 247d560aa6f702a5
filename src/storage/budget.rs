//! Budget repository for JSON storage
//!
//! Holds the single current budget in budget.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Budget, Money};

use super::file_io::{read_json, write_json_atomic};
use super::poisoned;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct BudgetData {
    #[serde(default)]
    budget: Option<Budget>,
}

/// Repository for the budget singleton
pub struct BudgetRepository {
    path: PathBuf,
    current: RwLock<Option<Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            current: RwLock::new(None),
        }
    }

    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: BudgetData = read_json(&self.path)?;
        let mut current = self.current.write().map_err(poisoned)?;
        *current = file_data.budget;
        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let current = self.current.read().map_err(poisoned)?;
        write_json_atomic(
            &self.path,
            &BudgetData {
                budget: current.clone(),
            },
        )
    }

    /// The stored budget, if one was ever set
    pub fn get(&self) -> Result<Option<Budget>, LedgerError> {
        let current = self.current.read().map_err(poisoned)?;
        Ok(current.clone())
    }

    /// The budget amount, zero when unset
    pub fn amount(&self) -> Result<Money, LedgerError> {
        Ok(self.get()?.map(|b| b.total_budget).unwrap_or_default())
    }

    /// Replace the stored budget
    pub fn set(&self, budget: Budget) -> Result<(), LedgerError> {
        let mut current = self.current.write().map_err(poisoned)?;
        *current = Some(budget);
        Ok(())
    }

    /// Put back a previously stored value, including "never set"
    pub fn restore(&self, budget: Option<Budget>) -> Result<(), LedgerError> {
        let mut current = self.current.write().map_err(poisoned)?;
        *current = budget;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unset_budget_is_zero() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budget.json"));
        repo.load().unwrap();
        assert!(repo.get().unwrap().is_none());
        assert_eq!(repo.amount().unwrap(), Money::zero());
    }

    #[test]
    fn test_set_replaces_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.json");
        let repo = BudgetRepository::new(path.clone());

        repo.set(Budget::new(Money::from_cents(50_000))).unwrap();
        repo.set(Budget::new(Money::from_cents(100_000))).unwrap();
        repo.save().unwrap();

        let repo2 = BudgetRepository::new(path);
        repo2.load().unwrap();
        assert_eq!(repo2.amount().unwrap(), Money::from_cents(100_000));
    }
}
