use std::sync::Once;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use expense_ledger::cli::{
    handle_backup_command, handle_budget_command, handle_category_command,
    handle_expense_command, handle_lend_command, handle_report_command,
};
use expense_ledger::config::{paths::LedgerPaths, settings::Settings};
use expense_ledger::models::DEFAULT_CATALOG;
use expense_ledger::storage::init::{initialize_storage, needs_initialization};
use expense_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Personal expense ledger with a monthly budget dashboard",
    long_about = "Track expenses by category, transfers to savings and money lent or \
                  borrowed, against a single overall budget. Data lives in plain JSON \
                  files under the ledger data directory."
)]
struct Cli {
    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the ledger and seed the default categories
    Init,

    /// Show current configuration and paths
    Config,

    /// Budget commands
    #[command(subcommand)]
    Budget(expense_ledger::cli::BudgetCommands),

    /// Category catalog commands
    #[command(subcommand, alias = "cat")]
    Category(expense_ledger::cli::CategoryCommands),

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(expense_ledger::cli::ExpenseCommands),

    /// Lend/borrow commands
    #[command(subcommand)]
    Lend(expense_ledger::cli::LendCommands),

    /// Dashboard and reports
    #[command(subcommand)]
    Report(expense_ledger::cli::ReportCommands),

    /// Backup and restore commands
    #[command(subcommand)]
    Backup(expense_ledger::cli::BackupCommands),
}

static TRACING_INIT: Once = Once::new();

fn init_tracing(verbose: u8) {
    TRACING_INIT.call_once(|| {
        let level = match verbose {
            0 => "expense_ledger=warn",
            1 => "expense_ledger=info",
            _ => "expense_ledger=debug",
        };

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = level.parse() {
            filter = filter.add_directive(directive);
        }

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            let fresh = needs_initialization(&paths);
            println!("Initializing ledger at: {}", paths.data_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            if fresh {
                println!("Default categories:");
                for (name, subcategories) in DEFAULT_CATALOG {
                    println!("  - {} ({})", name, subcategories.join(", "));
                }
            } else {
                println!("Existing category catalog kept.");
            }
            println!();
            println!("Run 'ledger category list' to see all categories.");
        }
        Some(Commands::Config) => {
            println!("Expense Ledger Configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Monthly series limit: {}", settings.monthly_series_limit);
            println!("  Top categories:       {}", settings.top_categories);
            println!("  Auto backup:          {}", settings.auto_backup);
            println!(
                "  Backup retention:     {} daily, {} monthly",
                settings.backup_retention.daily_count, settings.backup_retention.monthly_count
            );
        }
        Some(Commands::Budget(cmd)) => {
            let storage = Storage::open(paths)?;
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            let storage = Storage::open(paths)?;
            handle_category_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            let storage = Storage::open(paths)?;
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Lend(cmd)) => {
            let storage = Storage::open(paths)?;
            handle_lend_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let storage = Storage::open(paths)?;
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, cmd)?;
        }
        None => {
            println!("Expense Ledger - personal expenses against a monthly budget");
            println!();
            println!("Run 'ledger --help' for usage information.");
            println!("Run 'ledger report dashboard' to see this month.");
        }
    }

    Ok(())
}
