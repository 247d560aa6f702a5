//! Storage layer for the expense ledger
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Each repository owns one file under the data directory.

pub mod budget;
pub mod catalog;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod lend_borrow;

pub(crate) use budget::BudgetData;
pub use budget::BudgetRepository;
pub use catalog::{CatalogData, CatalogRepository};
pub(crate) use expenses::ExpenseData;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub(crate) use lend_borrow::LendBorrowData;
pub use lend_borrow::LendBorrowRepository;

use std::fmt::Display;

use tracing::debug;

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Map a poisoned lock into a storage error
pub(crate) fn poisoned<E: Display>(e: E) -> LedgerError {
    LedgerError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub expenses: ExpenseRepository,
    pub lend_borrow: LendBorrowRepository,
    pub catalog: CatalogRepository,
    pub budget: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            lend_borrow: LendBorrowRepository::new(paths.lend_borrow_file()),
            catalog: CatalogRepository::new(paths.catalog_file()),
            budget: BudgetRepository::new(paths.budget_file()),
            paths,
        })
    }

    /// Open storage at `paths`, seeding the default catalog on first use
    pub fn open(paths: LedgerPaths) -> Result<Self, LedgerError> {
        initialize_storage(&paths)?;
        let mut storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), LedgerError> {
        self.expenses.load()?;
        self.lend_borrow.load()?;
        self.catalog.load()?;
        self.budget.load()?;
        debug!(data_dir = %self.paths.data_dir().display(), "loaded ledger data");
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), LedgerError> {
        self.expenses.save()?;
        self.lend_borrow.save()?;
        self.catalog.save()?;
        self.budget.save()?;
        Ok(())
    }

    /// Check if the ledger has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("backups").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_open_seeds_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        assert_eq!(storage.catalog.category_count().unwrap(), 7);
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }
}
