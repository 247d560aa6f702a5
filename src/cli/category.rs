//! Category CLI commands
//!
//! Implements CLI commands for the category catalog.

use clap::Subcommand;
use tracing::warn;

use crate::backup::BackupManager;
use crate::config::settings::Settings;
use crate::display::{format_category_tree, format_name_list};
use crate::error::LedgerResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with their subcategories
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
    },

    /// Add a subcategory to an existing category
    #[command(name = "add-sub")]
    AddSub {
        /// Parent category name
        category: String,
        /// Subcategory name
        name: String,
    },

    /// List the subcategories of a category
    Subs {
        /// Category name
        category: String,
    },

    /// Rename a category (recorded entries keep their old text)
    Rename {
        /// Current name
        from: String,
        /// New name
        to: String,
    },

    /// Delete a category (its subcategories are kept)
    Delete {
        /// Category name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> LedgerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_tree(&service.list_with_subcategories()?));
        }

        CategoryCommands::Add { name } => {
            let category = service.create_category(&name)?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::AddSub { category, name } => {
            let sub = service.add_subcategory(&category, &name)?;
            println!("Added subcategory '{}' to {}", sub.name, category.trim());
        }

        CategoryCommands::Subs { category } => {
            let names = service.list_subcategories(&category)?;
            print!(
                "{}",
                format_name_list(&names, &format!("No subcategories for '{}'.", category))
            );
        }

        CategoryCommands::Rename { from, to } => {
            let category = service.rename_category(&from, &to)?;
            println!("Renamed '{}' to '{}'", from.trim(), category.name);
        }

        CategoryCommands::Delete { name } => {
            if settings.auto_backup {
                let manager =
                    BackupManager::new(storage.paths().clone(), settings.backup_retention.clone());
                if let Err(e) = manager.create_backup_with_retention() {
                    warn!(error = %e, "backup before category delete failed");
                }
            }

            let category = service.delete_category(&name)?;
            println!("Deleted category: {}", category.name);
        }
    }

    Ok(())
}
