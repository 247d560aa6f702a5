//! Expense CLI commands
//!
//! Recording, editing and listing expenses.

use clap::Subcommand;

use super::{month_or_current, parse_date, parse_id};
use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_register, format_expenses_by_date};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, ExpenseId, ExpenseInput, PaymentStatus};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Category name (use "Savings" for a transfer to savings)
        category: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Subcategory from the catalog
        #[arg(short, long)]
        subcategory: Option<String>,
        /// New category, added to the catalog and used instead of CATEGORY
        #[arg(long)]
        custom_category: Option<String>,
        /// New subcategory, added to the catalog and used instead of --subcategory
        #[arg(long)]
        custom_subcategory: Option<String>,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Payment status: Pending or Paid
        #[arg(long)]
        status: Option<String>,
    },

    /// Edit an expense; unspecified fields keep their current values
    Edit {
        /// Expense ID (e.g., "exp-3" or "3")
        id: String,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New subcategory (empty string clears it)
        #[arg(short, long)]
        subcategory: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// New payment status
        #[arg(long)]
        status: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },

    /// Set the payment status of an expense
    Status {
        /// Expense ID
        id: String,
        /// Pending or Paid
        status: String,
    },

    /// Show a single expense
    Show {
        /// Expense ID
        id: String,
    },

    /// List expenses
    List {
        /// Month to list (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Start date of a range (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End date of a range (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Show the most recent N expenses across all months
        #[arg(short, long, conflicts_with_all = ["month", "from"])]
        recent: Option<usize>,
        /// Group the month's expenses by date
        #[arg(long)]
        by_date: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            category,
            amount,
            subcategory,
            custom_category,
            custom_subcategory,
            date,
            description,
            status,
        } => {
            let mut input = ExpenseInput::new(category, amount);
            if let Some(sub) = subcategory {
                input = input.subcategory(sub);
            }
            if let Some(c) = custom_category {
                input = input.custom_category(c);
            }
            if let Some(s) = custom_subcategory {
                input = input.custom_subcategory(s);
            }
            if let Some(d) = date {
                input = input.date(d);
            }
            if let Some(m) = description {
                input = input.description(m);
            }
            if let Some(s) = status {
                input = input.status(s);
            }

            let expense = service.record(&input)?;
            println!("Recorded expense: {}", expense.id);
            println!(
                "  {} {} {}",
                expense.date,
                expense.category,
                expense.amount.format_with_symbol(symbol)
            );
            if expense.is_savings {
                println!("  (transfer to savings)");
            }
        }

        ExpenseCommands::Edit {
            id,
            category,
            amount,
            subcategory,
            date,
            description,
            status,
        } => {
            let existing = find_expense(&service, &id)?;

            let mut input = ExpenseInput::new(
                category.unwrap_or_else(|| existing.category.clone()),
                amount.unwrap_or_else(|| existing.amount.to_decimal_string()),
            )
            .date(date.unwrap_or_else(|| existing.date.to_string()))
            .description(description.unwrap_or_else(|| existing.description.clone()))
            .status(status.unwrap_or_else(|| existing.payment_status.to_string()));

            if let Some(sub) = subcategory.or_else(|| existing.subcategory.clone()) {
                input = input.subcategory(sub);
            }

            let expense = service.update(existing.id, &input)?;
            println!("Updated expense: {}", expense.id);
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.delete(parse_id::<ExpenseId>(&id, "expense")?)?;
            println!(
                "Deleted expense: {} ({} {})",
                expense.id,
                expense.category,
                expense.amount.format_with_symbol(symbol)
            );
        }

        ExpenseCommands::Status { id, status } => {
            let status = status
                .parse::<PaymentStatus>()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;
            let expense = service.set_payment_status(parse_id(&id, "expense")?, status)?;
            println!("{} is now {}", expense.id, expense.payment_status);
        }

        ExpenseCommands::Show { id } => {
            let expense = find_expense(&service, &id)?;
            print!("{}", format_expense_details(&expense, symbol));
        }

        ExpenseCommands::List {
            month,
            from,
            to,
            recent,
            by_date,
        } => {
            if let Some(limit) = recent {
                let expenses = service.recent(Some(limit))?;
                print!("{}", format_expense_register(&expenses, symbol));
                return Ok(());
            }

            if let (Some(from), Some(to)) = (from, to) {
                let start = parse_date(&from)?;
                let end = parse_date(&to)?;
                let expenses = service.list_between(start, end)?;
                println!("Expenses from {} to {}", start, end);
                print!("{}", format_expense_register(&expenses, symbol));
                return Ok(());
            }

            let month = month_or_current(month.as_deref())?;
            println!("Expenses for {}", month.display_long());
            if by_date {
                print!(
                    "{}",
                    format_expenses_by_date(&service.grouped_by_date(month)?, symbol)
                );
            } else {
                print!(
                    "{}",
                    format_expense_register(&service.list_for_month(month)?, symbol)
                );
            }
        }
    }

    Ok(())
}

fn find_expense(service: &ExpenseService<'_>, id: &str) -> LedgerResult<Expense> {
    service
        .find(id)?
        .ok_or_else(|| LedgerError::expense_not_found(id))
}
