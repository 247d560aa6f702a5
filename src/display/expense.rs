//! Expense and lend/borrow display formatting
//!
//! Register-style tables for ledger entries and a detail view for a
//! single expense.

use crate::models::{Expense, LendBorrow, PaymentStatus};
use crate::services::ExpensesOnDate;

/// Format a single expense as a register row
pub fn format_expense_row(expense: &Expense, symbol: &str) -> String {
    let status_icon = match expense.payment_status {
        PaymentStatus::Paid => "✓",
        PaymentStatus::Pending => " ",
    };
    let savings_marker = if expense.is_savings { " [savings]" } else { "" };

    let category = match expense.subcategory.as_deref() {
        Some(sub) => format!("{} / {}", expense.category, sub),
        None => expense.category.clone(),
    };

    format!(
        "{:>7} {} {} {:28} {:20} {:>12}{}",
        expense.id.to_string(),
        status_icon,
        expense.date.format("%Y-%m-%d"),
        truncate(&category, 28),
        truncate(&expense.description, 20),
        expense.amount.format_with_symbol(symbol),
        savings_marker
    )
}

fn register_header() -> String {
    let mut output = format!(
        "{:>7} {} {:10} {:28} {:20} {:>12}\n",
        "ID", "P", "Date", "Category", "Description", "Amount"
    );
    output.push_str(&"-".repeat(83));
    output.push('\n');
    output
}

/// Format a list of expenses as a register
pub fn format_expense_register(expenses: &[Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = register_header();
    for expense in expenses {
        output.push_str(&format_expense_row(expense, symbol));
        output.push('\n');
    }
    output
}

/// Format expenses grouped under a heading per day
pub fn format_expenses_by_date(groups: &[ExpensesOnDate], symbol: &str) -> String {
    if groups.is_empty() {
        return "No expenses recorded for this month.\n".to_string();
    }

    let mut output = register_header();
    for group in groups {
        output.push_str(&format!("{}\n", group.date.format("%A, %d %B %Y")));
        for expense in &group.expenses {
            output.push_str(&format_expense_row(expense, symbol));
            output.push('\n');
        }
    }
    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("Category:    {}\n", expense.category));
    if let Some(sub) = &expense.subcategory {
        output.push_str(&format!("Subcategory: {}\n", sub));
    }
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    if !expense.description.is_empty() {
        output.push_str(&format!("Description: {}\n", expense.description));
    }
    output.push_str(&format!("Status:      {}\n", expense.payment_status));
    if expense.is_savings {
        output.push_str("Savings:     yes (excluded from spent and pending)\n");
    }

    output
}

/// Format lend/borrow entries as a table
pub fn format_lend_borrow_list(entries: &[LendBorrow], symbol: &str) -> String {
    if entries.is_empty() {
        return "No lend/borrow entries found.\n".to_string();
    }

    let mut output = format!(
        "{:>6} {:10} {:6} {:18} {:>12} {:10} {}\n",
        "ID", "Date", "Type", "Name", "Amount", "Status", "Description"
    );
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for entry in entries {
        output.push_str(&format!(
            "{:>6} {} {:6} {:18} {:>12} {:10} {}\n",
            entry.id.to_string(),
            entry.date.format("%Y-%m-%d"),
            entry.kind.to_string(),
            truncate(&entry.name, 18),
            entry.amount.format_with_symbol(symbol),
            truncate(&entry.status, 10),
            entry.description
        ));
    }

    output
}

/// Truncate a string to a maximum display width
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
