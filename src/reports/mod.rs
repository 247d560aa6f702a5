//! Reports module for the expense ledger
//!
//! Read-only views over the ledger: the aggregation engine, the monthly
//! comparison series and the dashboard that bundles them.

pub mod aggregate;
pub mod dashboard;
pub mod monthly;

pub use aggregate::{AggregationEngine, CategoryTotal, SubcategoryTotal};
pub use dashboard::{Dashboard, PreviousMonth};
pub use monthly::{MonthlyPoint, MonthlySeries};
