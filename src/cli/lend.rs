//! Lend/borrow CLI commands

use clap::Subcommand;

use super::{month_or_current, parse_id};
use crate::config::settings::Settings;
use crate::display::format_lend_borrow_list;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{LendBorrowId, LendBorrowInput};
use crate::reports::AggregationEngine;
use crate::services::LendBorrowService;
use crate::storage::Storage;

/// Lend/borrow subcommands
#[derive(Subcommand)]
pub enum LendCommands {
    /// Record money lent to or borrowed from someone
    Add {
        /// Counterparty name
        name: String,
        /// Amount
        amount: String,
        /// "lend" or "borrow"
        #[arg(short = 't', long = "type", default_value = "lend")]
        kind: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Free-text status (defaults to Pending)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Edit an entry; unspecified fields keep their current values
    Edit {
        /// Entry ID (e.g., "lb-2" or "2")
        id: String,
        /// New counterparty name
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// "lend" or "borrow"
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// New status
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },

    /// Change the status of an entry
    Status {
        /// Entry ID
        id: String,
        /// New status (e.g., "Returned")
        status: String,
    },

    /// List entries
    List {
        /// Month to list (YYYY-MM, defaults to the current month)
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,
        /// List every entry
        #[arg(long)]
        all: bool,
    },
}

/// Handle a lend/borrow command
pub fn handle_lend_command(
    storage: &Storage,
    settings: &Settings,
    cmd: LendCommands,
) -> LedgerResult<()> {
    let service = LendBorrowService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        LendCommands::Add {
            name,
            amount,
            kind,
            date,
            description,
            status,
        } => {
            let mut input = LendBorrowInput::new(name, amount, kind);
            if let Some(d) = date {
                input = input.date(d);
            }
            if let Some(m) = description {
                input = input.description(m);
            }
            if let Some(s) = status {
                input = input.status(s);
            }

            let entry = service.record(&input)?;
            println!("Recorded {}: {}", entry.kind.to_string().to_lowercase(), entry.id);
            println!(
                "  {} {} {} ({})",
                entry.date,
                entry.name,
                entry.amount.format_with_symbol(symbol),
                entry.status
            );
        }

        LendCommands::Edit {
            id,
            name,
            amount,
            kind,
            date,
            description,
            status,
        } => {
            let lb_id: LendBorrowId = parse_id(&id, "lend/borrow")?;
            let existing = service
                .get(lb_id)?
                .ok_or_else(|| LedgerError::lend_borrow_not_found(&id))?;

            let input = LendBorrowInput::new(
                name.unwrap_or_else(|| existing.name.clone()),
                amount.unwrap_or_else(|| existing.amount.to_decimal_string()),
                kind.unwrap_or_else(|| existing.kind.to_string()),
            )
            .date(date.unwrap_or_else(|| existing.date.to_string()))
            .description(description.unwrap_or_else(|| existing.description.clone()))
            .status(status.unwrap_or_else(|| existing.status.clone()));

            let entry = service.update(lb_id, &input)?;
            println!("Updated entry: {}", entry.id);
        }

        LendCommands::Delete { id } => {
            let entry = service.delete(parse_id(&id, "lend/borrow")?)?;
            println!(
                "Deleted entry: {} ({} {})",
                entry.id,
                entry.name,
                entry.amount.format_with_symbol(symbol)
            );
        }

        LendCommands::Status { id, status } => {
            let entry = service.set_status(parse_id(&id, "lend/borrow")?, &status)?;
            println!("{} is now {}", entry.id, entry.status);
        }

        LendCommands::List { month, all } => {
            let entries = if all {
                println!("All lend/borrow entries");
                service.list_all()?
            } else {
                let month = month_or_current(month.as_deref())?;
                println!("Lend/borrow for {}", month.display_long());
                service.list_for_month(month)?
            };
            print!("{}", format_lend_borrow_list(&entries, symbol));

            let engine = AggregationEngine::new(storage);
            println!();
            println!(
                "Lent (all time):     {}",
                engine.total_lent()?.format_with_symbol(symbol)
            );
            println!(
                "Borrowed (all time): {}",
                engine.total_borrowed()?.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}
