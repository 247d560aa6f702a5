//! Budget service
//!
//! Sets and reads the single overall budget.

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, Money};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Replace the budget with a parsed amount string
    pub fn set_budget_str(&self, amount: &str) -> LedgerResult<Budget> {
        let amount =
            Money::parse_non_negative(amount).map_err(|e| LedgerError::Validation(e.to_string()))?;
        self.set_budget(amount)
    }

    /// Replace the budget
    pub fn set_budget(&self, amount: Money) -> LedgerResult<Budget> {
        if amount.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Budget cannot be negative: {}",
                amount
            )));
        }

        let previous = self.storage.budget.amount()?;
        let budget = Budget::new(amount);
        self.storage.budget.set(budget.clone())?;
        self.storage.budget.save()?;

        info!(from = %previous, to = %amount, "set budget");
        Ok(budget)
    }

    /// The current budget, zero when never set
    pub fn get_budget(&self) -> LedgerResult<Money> {
        self.storage.budget.amount()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_unset_budget_is_zero() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        assert_eq!(service.get_budget().unwrap(), Money::zero());
    }

    #[test]
    fn test_set_replaces() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service.set_budget_str("500").unwrap();
        service.set_budget_str("1000.00").unwrap();
        assert_eq!(service.get_budget().unwrap(), Money::from_cents(100_000));
    }

    #[test]
    fn test_rejects_invalid_amounts() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        assert!(service.set_budget_str("lots").unwrap_err().is_validation());
        assert!(service.set_budget_str("-5").unwrap_err().is_validation());
        assert!(service
            .set_budget(Money::from_cents(-1))
            .unwrap_err()
            .is_validation());
        assert_eq!(service.get_budget().unwrap(), Money::zero());
    }
}
