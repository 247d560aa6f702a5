//! Core data models for the expense ledger
//!
//! Expenses, lend/borrow entries, the category catalog, the budget, and the
//! value types they share (IDs, money, month keys).

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod lend_borrow;
pub mod money;
pub mod month;

pub use budget::Budget;
pub use category::{Category, CategoryValidationError, Subcategory, DEFAULT_CATALOG};
pub use expense::{
    is_savings_category, Expense, ExpenseDraft, ExpenseInput, ExpenseValidationError,
    PaymentStatus,
};
pub use ids::{CategoryId, ExpenseId, LendBorrowId, SubcategoryId};
pub use lend_borrow::{
    LendBorrow, LendBorrowDraft, LendBorrowInput, LendBorrowKind, LendBorrowValidationError,
};
pub use money::{Money, MoneyParseError};
pub use month::{MonthKey, MonthParseError};
