//! Display formatting for terminal output
//!
//! Turns models and reports into plain-text tables for the CLI.

pub mod category;
pub mod dashboard;
pub mod expense;
pub mod report;

pub use category::{
    format_category_breakdown, format_category_tree, format_name_list,
    format_subcategory_breakdown,
};
pub use dashboard::format_dashboard;
pub use expense::{
    format_expense_details, format_expense_register, format_expenses_by_date,
    format_lend_borrow_list,
};
