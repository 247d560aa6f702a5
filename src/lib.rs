//! Expense Ledger - personal expense tracking against a monthly budget
//!
//! This library provides the core functionality for the `ledger` command:
//! recording expenses against a user-editable category catalog, tracking
//! money lent and borrowed, and rolling everything up into a monthly
//! dashboard measured against a single overall budget.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, lend/borrow, catalog, budget)
//! - `storage`: JSON file storage layer
//! - `services`: Validation and business rules for every write
//! - `reports`: Aggregation engine, dashboard and monthly series
//! - `backup`: Backup archives and restore
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `ledger` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_ledger::config::paths::LedgerPaths;
//! use expense_ledger::models::{ExpenseInput, MonthKey};
//! use expense_ledger::reports::Dashboard;
//! use expense_ledger::services::ExpenseService;
//! use expense_ledger::storage::Storage;
//!
//! let storage = Storage::open(LedgerPaths::new()?)?;
//! ExpenseService::new(&storage).record(&ExpenseInput::new("Food", "12.50").status("Paid"))?;
//! let dashboard = Dashboard::generate(&storage, MonthKey::current())?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
