//! Dashboard display formatting

use super::category::format_category_breakdown;
use super::expense::{format_expenses_by_date, format_lend_borrow_list};
use super::report::{double_separator, format_header, separator};
use crate::models::Money;
use crate::reports::Dashboard;

const WIDTH: usize = 60;

/// Format the monthly dashboard
///
/// `top_categories` caps the breakdown section; the full list is available
/// through `report categories`.
pub fn format_dashboard(dashboard: &Dashboard, symbol: &str, top_categories: usize) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str(&format_header(&dashboard.month.display_long(), WIDTH));
    output.push('\n');
    output.push_str(&double_separator(WIDTH));
    output.push('\n');

    let remaining_label = if dashboard.over_budget {
        "Over budget"
    } else {
        "Remaining"
    };
    let remaining = if dashboard.over_budget {
        dashboard.remaining.abs()
    } else {
        dashboard.remaining
    };

    for (label, amount) in [
        ("Budget", dashboard.budget),
        ("Spent", dashboard.spent),
        ("Pending", dashboard.pending),
        ("Savings", dashboard.savings),
        (remaining_label, remaining),
    ] {
        output.push_str(&format!("{:<24}{:>16}\n", label, money(amount)));
    }

    output.push_str(&separator(WIDTH));
    output.push('\n');
    let prev = &dashboard.previous;
    output.push_str(&format!("{} (previous month)\n", prev.month.display_long()));
    output.push_str(&format!("{:<24}{:>16}\n", "  Spent", money(prev.spent)));
    output.push_str(&format!("{:<24}{:>16}\n", "  Savings", money(prev.savings)));
    output.push_str(&format!("{:<24}{:>16}\n", "  Remaining", money(prev.remaining)));

    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<24}{:>16}\n",
        "Savings (all time)",
        money(dashboard.total_savings_all_time)
    ));
    output.push_str(&format!(
        "{:<24}{:>16}\n",
        "Lent (all time)",
        money(dashboard.total_lends)
    ));
    output.push_str(&format!(
        "{:<24}{:>16}\n",
        "Borrowed (all time)",
        money(dashboard.total_borrows)
    ));

    output.push_str(&format!("\nTop {} categories\n", top_categories));
    output.push_str(&format_category_breakdown(
        dashboard.top_categories(top_categories),
        symbol,
    ));

    output.push_str("\nExpenses\n");
    output.push_str(&format_expenses_by_date(&dashboard.expenses, symbol));

    if !dashboard.lend_borrow.is_empty() {
        output.push_str("\nLend / borrow this month\n");
        output.push_str(&format_lend_borrow_list(&dashboard.lend_borrow, symbol));
    }

    if !dashboard.available_months.is_empty() {
        let months: Vec<_> = dashboard
            .available_months
            .iter()
            .map(|m| m.to_string())
            .collect();
        output.push_str(&format!("\nMonths with data: {}\n", months.join(", ")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{ExpenseInput, MonthKey};
    use crate::services::{BudgetService, ExpenseService};
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn dashboard_for(budget: &str, spend: &str) -> (TempDir, Dashboard) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        BudgetService::new(&storage).set_budget_str(budget).unwrap();
        ExpenseService::new(&storage)
            .record(
                &ExpenseInput::new("Food", spend)
                    .date("2024-05-03")
                    .status("Paid"),
            )
            .unwrap();

        let dashboard = Dashboard::generate(&storage, MonthKey::new(2024, 5).unwrap()).unwrap();
        (temp_dir, dashboard)
    }

    #[test]
    fn test_format_dashboard() {
        let (_temp, dashboard) = dashboard_for("1000", "200");
        let output = format_dashboard(&dashboard, "$", 5);

        assert!(output.contains("May 2024"));
        assert!(output.contains("April 2024 (previous month)"));
        assert!(output.contains("Remaining"));
        assert!(output.contains("$800.00"));
        assert!(output.contains("Food"));
    }

    #[test]
    fn test_over_budget_label() {
        let (_temp, dashboard) = dashboard_for("100", "150");
        let output = format_dashboard(&dashboard, "$", 5);

        assert!(output.contains("Over budget"));
        assert!(output.contains("$50.00"));
    }
}
