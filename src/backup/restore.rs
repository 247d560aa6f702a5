//! Backup restoration
//!
//! Puts the data files back exactly as an archive recorded them. Every
//! section is checked against its file format before anything is written.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::{
    write_json_atomic, BudgetData, CatalogData, ExpenseData, LendBorrowData,
};

use super::manager::{BackupArchive, ARCHIVE_SCHEMA_VERSION};

/// What happened to one data file during a restore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionOutcome {
    /// Overwritten with the archived contents
    Restored,
    /// The archive had no such file, so the current one was removed
    Cleared,
}

/// Handles restoring from backups
pub struct RestoreManager {
    paths: LedgerPaths,
}

impl RestoreManager {
    pub fn new(paths: LedgerPaths) -> Self {
        Self { paths }
    }

    /// Restore data from a backup file, overwriting all current data
    pub fn restore_from_file(&self, backup_path: &Path) -> LedgerResult<RestoreResult> {
        let archive = read_archive(backup_path)?;
        self.restore_from_archive(&archive)
    }

    /// Restore data from a parsed archive
    pub fn restore_from_archive(&self, archive: &BackupArchive) -> LedgerResult<RestoreResult> {
        check_version(archive)?;
        let archived = self.sections(archive);
        check_sections(&archived)?;
        self.paths.ensure_directories()?;

        let mut sections = Vec::with_capacity(4);
        for Section { name, value, path, .. } in archived {
            let outcome = if value.is_null() {
                if path.exists() {
                    fs::remove_file(&path).map_err(|e| {
                        LedgerError::Io(format!("Failed to clear {}: {}", name, e))
                    })?;
                }
                SectionOutcome::Cleared
            } else {
                write_json_atomic(&path, value)
                    .map_err(|e| LedgerError::Backup(format!("Failed to restore {}: {}", name, e)))?;
                SectionOutcome::Restored
            };
            sections.push((name, outcome));
        }

        info!(
            backup_date = %archive.created_at,
            schema_version = archive.schema_version,
            "restored backup"
        );

        Ok(RestoreResult {
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            sections,
        })
    }

    /// Validate a backup file without restoring it
    pub fn validate_backup(&self, backup_path: &Path) -> LedgerResult<ValidationResult> {
        let archive = read_archive(backup_path)?;
        check_version(&archive)?;
        let archived = self.sections(&archive);
        check_sections(&archived)?;

        let mut present = Vec::new();
        let mut missing = Vec::new();
        for Section { name, value, .. } in archived {
            if value.is_object() {
                present.push(name);
            } else {
                missing.push(name);
            }
        }

        Ok(ValidationResult {
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            present,
            missing,
        })
    }

    fn sections<'a>(&self, archive: &'a BackupArchive) -> [Section<'a>; 4] {
        [
            Section {
                name: "expenses",
                value: &archive.expenses,
                path: self.paths.expenses_file(),
                check: conforms::<ExpenseData>,
            },
            Section {
                name: "lend/borrow",
                value: &archive.lend_borrow,
                path: self.paths.lend_borrow_file(),
                check: conforms::<LendBorrowData>,
            },
            Section {
                name: "catalog",
                value: &archive.catalog,
                path: self.paths.catalog_file(),
                check: conforms::<CatalogData>,
            },
            Section {
                name: "budget",
                value: &archive.budget,
                path: self.paths.budget_file(),
                check: conforms::<BudgetData>,
            },
        ]
    }
}

/// One data file inside an archive
struct Section<'a> {
    name: &'static str,
    value: &'a Value,
    path: PathBuf,
    check: fn(&Value) -> Result<(), serde_json::Error>,
}

fn conforms<T: DeserializeOwned>(value: &Value) -> Result<(), serde_json::Error> {
    <T as serde::Deserialize>::deserialize(value).map(|_| ())
}

/// Null sections are allowed; anything else must parse as its data file
fn check_sections(sections: &[Section<'_>]) -> LedgerResult<()> {
    for section in sections {
        if section.value.is_null() {
            continue;
        }
        (section.check)(section.value).map_err(|e| {
            LedgerError::Backup(format!("Invalid {} section: {}", section.name, e))
        })?;
    }
    Ok(())
}

fn read_archive(backup_path: &Path) -> LedgerResult<BackupArchive> {
    let contents = fs::read_to_string(backup_path)
        .map_err(|e| LedgerError::Io(format!("Failed to read backup file: {}", e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| LedgerError::Backup(format!("Failed to parse backup file: {}", e)))
}

fn check_version(archive: &BackupArchive) -> LedgerResult<()> {
    if archive.schema_version > ARCHIVE_SCHEMA_VERSION {
        return Err(LedgerError::Backup(format!(
            "Backup schema v{} is newer than supported v{}",
            archive.schema_version, ARCHIVE_SCHEMA_VERSION
        )));
    }
    Ok(())
}

/// Result of a restore operation
#[derive(Debug)]
pub struct RestoreResult {
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    pub sections: Vec<(&'static str, SectionOutcome)>,
}

impl RestoreResult {
    /// Names of the files that were overwritten
    pub fn restored(&self) -> Vec<&'static str> {
        self.with_outcome(SectionOutcome::Restored)
    }

    /// Names of the files that were removed
    pub fn cleared(&self) -> Vec<&'static str> {
        self.with_outcome(SectionOutcome::Cleared)
    }

    fn with_outcome(&self, outcome: SectionOutcome) -> Vec<&'static str> {
        self.sections
            .iter()
            .filter(|(_, o)| *o == outcome)
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn summary(&self) -> String {
        let restored = self.restored();
        let cleared = self.cleared();
        let mut summary = format!("Restored: {}", restored.join(", "));
        if !cleared.is_empty() {
            summary.push_str(&format!(" (emptied: {})", cleared.join(", ")));
        }
        summary
    }
}

/// Result of validating a backup
#[derive(Debug)]
pub struct ValidationResult {
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    pub present: Vec<&'static str>,
    pub missing: Vec<&'static str>,
}

impl ValidationResult {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_complete() {
            format!("Complete backup (v{})", self.schema_version)
        } else {
            format!(
                "Partial backup (v{}): has {}, missing {}",
                self.schema_version,
                self.present.join(", "),
                self.missing.join(", ")
            )
        }
    }
}
