//! Category display formatting
//!
//! Formats the catalog as a tree and the per-category spending breakdowns.

use super::report::{format_bar, format_percentage, percentage_of};
use crate::models::Money;
use crate::reports::{CategoryTotal, SubcategoryTotal};
use crate::services::CategoryWithSubcategories;

const BAR_WIDTH: usize = 20;

/// Format the catalog as a tree of categories and their subcategories
pub fn format_category_tree(catalog: &[CategoryWithSubcategories]) -> String {
    if catalog.is_empty() {
        return "No categories found.\n\nRun 'ledger init' to create the default catalog.\n"
            .to_string();
    }

    let mut output = String::new();

    for (i, entry) in catalog.iter().enumerate() {
        output.push_str(&format!("{}\n", entry.category.name));

        if entry.subcategories.is_empty() {
            output.push_str("  (no subcategories)\n");
        } else {
            for (j, sub) in entry.subcategories.iter().enumerate() {
                let prefix = if j == entry.subcategories.len() - 1 {
                    "└── "
                } else {
                    "├── "
                };
                output.push_str(&format!("  {}{}\n", prefix, sub.name));
            }
        }

        if i < catalog.len() - 1 {
            output.push('\n');
        }
    }

    output
}

/// Format a plain list of names, one per line
pub fn format_name_list(names: &[String], empty_message: &str) -> String {
    if names.is_empty() {
        return format!("{}\n", empty_message);
    }

    names.iter().map(|n| format!("{}\n", n)).collect()
}

/// Format per-category spending with bars and shares
pub fn format_category_breakdown(rows: &[CategoryTotal], symbol: &str) -> String {
    format_breakdown(
        "Category",
        rows.iter().map(|r| (r.category.as_str(), r.amount)),
        symbol,
    )
}

/// Format per-subcategory spending with bars and shares
pub fn format_subcategory_breakdown(rows: &[SubcategoryTotal], symbol: &str) -> String {
    format_breakdown(
        "Subcategory",
        rows.iter().map(|r| (r.subcategory.as_str(), r.amount)),
        symbol,
    )
}

fn format_breakdown<'a, I>(label: &str, rows: I, symbol: &str) -> String
where
    I: Iterator<Item = (&'a str, Money)> + Clone,
{
    if rows.clone().next().is_none() {
        return "No paid spending in this month.\n".to_string();
    }

    let total: Money = rows.clone().map(|(_, amount)| amount).sum();
    let max = rows.clone().map(|(_, amount)| amount).max().unwrap_or_default();
    let name_width = rows
        .clone()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0)
        .max(label.len());

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:>12}  {:>6}\n",
        label,
        "Amount",
        "Share",
        width = name_width
    ));

    for (name, amount) in rows {
        output.push_str(&format!(
            "{:<width$}  {:>12}  {:>6}  {}\n",
            name,
            amount.format_with_symbol(symbol),
            format_percentage(percentage_of(amount, total)),
            format_bar(amount, max, BAR_WIDTH),
            width = name_width
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryId, Subcategory, SubcategoryId};

    #[test]
    fn test_tree() {
        let food = Category::new(CategoryId::new(1), "Food");
        let catalog = vec![
            CategoryWithSubcategories {
                subcategories: vec![
                    Subcategory::new(SubcategoryId::new(1), food.id, "Groceries"),
                    Subcategory::new(SubcategoryId::new(2), food.id, "Snacks"),
                ],
                category: food,
            },
            CategoryWithSubcategories {
                category: Category::new(CategoryId::new(2), "Pets"),
                subcategories: Vec::new(),
            },
        ];

        let output = format_category_tree(&catalog);
        assert!(output.contains("├── Groceries"));
        assert!(output.contains("└── Snacks"));
        assert!(output.contains("(no subcategories)"));
    }

    #[test]
    fn test_empty_tree() {
        assert!(format_category_tree(&[]).contains("ledger init"));
    }

    #[test]
    fn test_breakdown() {
        let rows = vec![
            CategoryTotal {
                category: "Food".into(),
                amount: Money::from_cents(30_000),
            },
            CategoryTotal {
                category: "Bills".into(),
                amount: Money::from_cents(10_000),
            },
        ];

        let output = format_category_breakdown(&rows, "$");
        assert!(output.contains("$300.00"));
        assert!(output.contains("75%"));
        assert!(output.contains("25%"));
        assert!(format_category_breakdown(&[], "$").contains("No paid spending"));
    }
}
