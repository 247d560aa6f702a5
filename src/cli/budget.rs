//! Budget CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the overall budget, replacing the current one
    Set {
        /// Amount (e.g., "1000" or "1000.00")
        amount: String,
    },

    /// Show the current budget
    Show,
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    let service = BudgetService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set { amount } => {
            let budget = service.set_budget_str(&amount)?;
            println!(
                "Budget set to {}",
                budget.total_budget.format_with_symbol(symbol)
            );
        }

        BudgetCommands::Show => match storage.budget.get()? {
            Some(budget) => {
                println!(
                    "Budget: {}",
                    budget.total_budget.format_with_symbol(symbol)
                );
                println!(
                    "Last set: {}",
                    budget.updated_at.format("%Y-%m-%d %H:%M UTC")
                );
            }
            None => {
                println!(
                    "Budget: {} (not set)",
                    service.get_budget()?.format_with_symbol(symbol)
                );
                println!("Set one with: ledger budget set <amount>");
            }
        },
    }

    Ok(())
}
