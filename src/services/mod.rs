//! Service layer for the expense ledger
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, derived fields, and cross-entity side effects such as
//! adding free-text categories to the catalog.

pub mod budget;
pub mod category;
pub mod expense;
pub mod lend_borrow;

pub use budget::BudgetService;
pub use category::{CategoryService, CategoryWithSubcategories};
pub use expense::{ExpenseService, ExpensesOnDate, DEFAULT_RECENT_LIMIT};
pub use lend_borrow::LendBorrowService;
