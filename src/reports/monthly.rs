//! Monthly comparison report
//!
//! Paid spending and savings per month for the most recent months that
//! have either, oldest first.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::LedgerResult;
use crate::models::{Expense, Money, MonthKey};
use crate::storage::Storage;

/// One month of the comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub month: MonthKey,
    /// Short label, e.g. "May 2024"
    pub label: String,
    /// Paid, non-savings total
    pub expenses: Money,
    pub savings: Money,
}

/// Month-by-month spending and savings
#[derive(Debug, Clone, Serialize)]
pub struct MonthlySeries {
    pub points: Vec<MonthlyPoint>,
}

/// Build the series from a set of expenses
///
/// A month qualifies when it has a paid non-savings entry or a savings
/// entry. Pending spending alone does not make a month appear.
pub fn monthly_series(expenses: &[Expense], limit: usize) -> Vec<MonthlyPoint> {
    let mut months: BTreeMap<MonthKey, (Money, Money)> = BTreeMap::new();

    for expense in expenses {
        if expense.is_spent() {
            months.entry(expense.month()).or_default().0 += expense.amount;
        } else if expense.is_savings {
            months.entry(expense.month()).or_default().1 += expense.amount;
        }
    }

    let skip = months.len().saturating_sub(limit);
    months
        .into_iter()
        .skip(skip)
        .map(|(month, (expenses, savings))| MonthlyPoint {
            month,
            label: month.display_short(),
            expenses,
            savings,
        })
        .collect()
}

impl MonthlySeries {
    /// Generate the series for the most recent `limit` months
    pub fn generate(storage: &Storage, limit: usize) -> LedgerResult<Self> {
        let expenses = storage.expenses.get_all()?;
        Ok(Self {
            points: monthly_series(&expenses, limit),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        if self.points.is_empty() {
            return "No paid expenses or savings recorded yet.\n".to_string();
        }

        let mut output = String::new();
        output.push_str(&format!(
            "{:<10} {:>14} {:>14}\n",
            "Month", "Expenses", "Savings"
        ));
        output.push_str(&"-".repeat(40));
        output.push('\n');

        for point in &self.points {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14}\n",
                point.label,
                point.expenses.format_with_symbol(currency_symbol),
                point.savings.format_with_symbol(currency_symbol)
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseDraft, ExpenseId, ExpenseInput};
    use chrono::NaiveDate;

    fn expense(id: u64, date: &str, category: &str, amount: &str, status: &str) -> Expense {
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let input = ExpenseInput::new(category, amount).date(date).status(status);
        Expense::from_draft(
            ExpenseId::new(id),
            ExpenseDraft::from_input(&input, today).unwrap(),
        )
    }

    #[test]
    fn test_series_is_chronological_and_limited() {
        let rows = vec![
            expense(1, "2024-01-05", "Food", "10", "Paid"),
            expense(2, "2024-03-05", "Food", "30", "Paid"),
            expense(3, "2024-02-05", "Savings", "20", "Pending"),
            expense(4, "2024-03-09", "Savings", "5", "Paid"),
        ];

        let points = monthly_series(&rows, 2);
        let months: Vec<_> = points.iter().map(|p| p.month.to_string()).collect();
        assert_eq!(months, vec!["2024-02", "2024-03"]);

        assert_eq!(points[0].expenses, Money::zero());
        assert_eq!(points[0].savings, Money::from_cents(2_000));
        assert_eq!(points[1].expenses, Money::from_cents(3_000));
        assert_eq!(points[1].savings, Money::from_cents(500));
        assert_eq!(points[1].label, "Mar 2024");
    }

    #[test]
    fn test_pending_only_month_is_left_out() {
        let rows = vec![
            expense(1, "2024-01-05", "Food", "10", "Pending"),
            expense(2, "2024-02-05", "Food", "10", "Paid"),
        ];

        let points = monthly_series(&rows, 12);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].month, MonthKey::new(2024, 2).unwrap());
    }

    #[test]
    fn test_format_empty() {
        let series = MonthlySeries { points: Vec::new() };
        assert!(series.format_terminal("$").contains("No paid expenses"));
    }
}
