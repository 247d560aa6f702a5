//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::{BackupManager, RestoreManager};
use crate::config::paths::LedgerPaths;
use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup
    Create,

    /// List all available backups
    List {
        /// Show creation time and size on separate lines
        #[arg(short, long)]
        detailed: bool,
    },

    /// Restore from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show which sections a backup contains
    Info {
        /// Backup filename or path
        backup: String,
    },

    /// Delete old backups according to the retention policy
    Prune,
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &LedgerPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> LedgerResult<()> {
    let manager = BackupManager::new(paths.clone(), settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => {
            let (backup_path, pruned) = manager.create_backup_with_retention()?;
            println!("Backup created: {}", file_name(&backup_path));
            println!("Location: {}", backup_path.display());
            if !pruned.is_empty() {
                println!("Pruned {} old backup(s).", pruned.len());
            }
        }

        BackupCommands::List { detailed } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: ledger backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");

            for (i, backup) in backups.iter().enumerate() {
                let monthly_marker = if backup.is_monthly { " [monthly]" } else { "" };

                if detailed {
                    println!(
                        "{}. {}{}\n   Created: {}\n   Size: {}\n",
                        i + 1,
                        backup.filename,
                        monthly_marker,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                    );
                } else {
                    println!(
                        "  {}. {} ({}){}",
                        i + 1,
                        backup.filename,
                        format_size(backup.size_bytes),
                        monthly_marker,
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, paths, &backup)?;

            let restore_manager = RestoreManager::new(paths.clone());
            let validation = restore_manager.validate_backup(&backup_path)?;

            println!("File: {}", backup_path.display());
            println!(
                "Created: {}",
                validation.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("Status: {}", validation.summary());
            println!();

            if !force {
                println!("WARNING: This will overwrite ALL current data!");
                println!("To proceed, run again with --force flag:");
                println!("  ledger backup restore {} --force", backup);
                return Ok(());
            }

            if settings.auto_backup {
                let pre_restore = manager.create_backup()?;
                println!("Pre-restore backup saved: {}", file_name(&pre_restore));
            }

            let result = restore_manager.restore_from_file(&backup_path)?;
            println!("Restore complete.");
            println!("{}", result.summary());
        }

        BackupCommands::Info { backup } => {
            let backup_path = resolve_backup_path(&manager, paths, &backup)?;
            let validation = RestoreManager::new(paths.clone()).validate_backup(&backup_path)?;
            let metadata = std::fs::metadata(&backup_path)?;

            println!("File: {}", backup_path.display());
            println!("Size: {}", format_size(metadata.len()));
            println!(
                "Created: {}",
                validation.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("Schema version: {}", validation.schema_version);
            for name in &validation.present {
                println!("  {:<12} yes", name);
            }
            for name in &validation.missing {
                println!("  {:<12} no", name);
            }
        }

        BackupCommands::Prune => {
            let deleted = manager.enforce_retention()?;
            println!("Deleted {} backup(s).", deleted.len());
            println!(
                "Retention policy: {} daily, {} monthly",
                settings.backup_retention.daily_count, settings.backup_retention.monthly_count
            );
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(
    manager: &BackupManager,
    paths: &LedgerPaths,
    backup: &str,
) -> LedgerResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| LedgerError::NotFound {
                entity_type: "Backup",
                identifier: "latest".to_string(),
            });
    }

    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    let in_backup_dir = paths.backup_dir().join(backup);
    if in_backup_dir.exists() {
        return Ok(in_backup_dir);
    }

    let with_ext = paths.backup_dir().join(format!("{}.json", backup));
    if with_ext.exists() {
        return Ok(with_ext);
    }

    Err(LedgerError::NotFound {
        entity_type: "Backup",
        identifier: backup.to_string(),
    })
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
