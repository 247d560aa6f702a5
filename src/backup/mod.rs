//! Backup system for the expense ledger
//!
//! Provides rolling JSON backups with a retention policy, plus restore.
//!
//! # Backup Format
//!
//! Each backup is one JSON file holding:
//! - `schema_version`: archive format version
//! - `created_at`: when the backup was taken
//! - `expenses`, `lend_borrow`, `catalog`, `budget`: the data files verbatim,
//!   or `null` for a file that did not exist yet
//!
//! # Retention Policy
//!
//! The oldest backup of each calendar month counts as a monthly backup.
//! By default the newest 30 other backups and the newest 12 monthly
//! backups are kept.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_ledger::backup::{BackupManager, RestoreManager};
//! use expense_ledger::config::{LedgerPaths, BackupRetention};
//!
//! let paths = LedgerPaths::new()?;
//! let manager = BackupManager::new(paths.clone(), BackupRetention::default());
//! let (backup_path, _pruned) = manager.create_backup_with_retention()?;
//!
//! let result = RestoreManager::new(paths).restore_from_file(&backup_path)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupInfo, BackupManager, ARCHIVE_SCHEMA_VERSION};
pub use restore::{RestoreManager, RestoreResult, SectionOutcome, ValidationResult};
