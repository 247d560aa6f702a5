//! Report CLI commands
//!
//! Dashboard, category breakdowns and the monthly comparison series.

use clap::Subcommand;

use super::month_or_current;
use crate::config::settings::Settings;
use crate::display::report::format_header;
use crate::display::{format_category_breakdown, format_dashboard, format_subcategory_breakdown};
use crate::error::LedgerResult;
use crate::reports::{AggregationEngine, Dashboard, MonthlySeries};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Monthly dashboard: budget, spending, savings and breakdowns
    Dashboard {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Print the dashboard as JSON (amounts in currency units)
        #[arg(long)]
        json: bool,
    },

    /// Paid spending per category for a month
    Categories {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Paid spending per subcategory for a month
    Subcategories {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Expenses and savings for recent months, oldest first
    Monthly {
        /// Number of months to include
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print the series as JSON (amounts in currency units)
        #[arg(long)]
        json: bool,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Dashboard { month, json } => {
            let month = month_or_current(month.as_deref())?;
            let dashboard = Dashboard::generate(storage, month)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print!(
                    "{}",
                    format_dashboard(&dashboard, symbol, settings.top_categories)
                );
            }
        }

        ReportCommands::Categories { month } => {
            let month = month_or_current(month.as_deref())?;
            let rows = AggregationEngine::new(storage).by_category(month)?;
            let title = format!("Spending by category: {}", month.display_long());
            println!("{}", format_header(&title, 50));
            print!("{}", format_category_breakdown(&rows, symbol));
        }

        ReportCommands::Subcategories { month } => {
            let month = month_or_current(month.as_deref())?;
            let rows = AggregationEngine::new(storage).by_subcategory(month)?;
            let title = format!("Spending by subcategory: {}", month.display_long());
            println!("{}", format_header(&title, 50));
            print!("{}", format_subcategory_breakdown(&rows, symbol));
        }

        ReportCommands::Monthly { limit, json } => {
            let limit = limit.unwrap_or(settings.monthly_series_limit);
            let series = MonthlySeries::generate(storage, limit)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                print!("{}", series.format_terminal(symbol));
            }
        }
    }

    Ok(())
}
