//! Backup manager
//!
//! Writes timestamped JSON archives of every data file and prunes them
//! according to the retention policy in settings.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::paths::LedgerPaths;
use crate::config::settings::BackupRetention;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::write_json_atomic;

/// Archive format version written by this build
pub const ARCHIVE_SCHEMA_VERSION: u32 = 1;

const FILE_PREFIX: &str = "ledger-backup-";

/// Metadata about a backup file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    /// Parsed from the filename
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// Oldest backup of its calendar month; kept under the monthly quota
    pub is_monthly: bool,
}

/// On-disk backup format
///
/// Each data file is stored verbatim as a JSON value. Restoring parses each
/// one with the current file layout before writing it back.
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupArchive {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    pub expenses: serde_json::Value,
    pub lend_borrow: serde_json::Value,
    pub catalog: serde_json::Value,
    pub budget: serde_json::Value,
}

/// Creates, lists and prunes backups
pub struct BackupManager {
    backup_dir: PathBuf,
    paths: LedgerPaths,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: LedgerPaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            paths,
            retention,
        }
    }

    /// Archive all data files, returning the archive path
    pub fn create_backup(&self) -> LedgerResult<PathBuf> {
        let now = Utc::now();
        let filename = format!(
            "{}{}-{:03}.json",
            FILE_PREFIX,
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&filename);

        let archive = BackupArchive {
            schema_version: ARCHIVE_SCHEMA_VERSION,
            created_at: now,
            expenses: read_json_value(&self.paths.expenses_file())?,
            lend_borrow: read_json_value(&self.paths.lend_borrow_file())?,
            catalog: read_json_value(&self.paths.catalog_file())?,
            budget: read_json_value(&self.paths.budget_file())?,
        };

        write_json_atomic(&backup_path, &archive)
            .map_err(|e| LedgerError::Backup(format!("Failed to write {}: {}", filename, e)))?;

        info!(file = %filename, "created backup");
        Ok(backup_path)
    }

    /// All backups, newest first
    pub fn list_backups(&self) -> LedgerResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        let entries = fs::read_dir(&self.backup_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to read backup directory: {}", e)))?;

        for entry in entries {
            let entry = entry
                .map_err(|e| LedgerError::Io(format!("Failed to read directory entry: {}", e)))?;
            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        mark_monthly(&mut backups);
        Ok(backups)
    }

    /// Delete backups beyond the daily and monthly quotas
    pub fn enforce_retention(&self) -> LedgerResult<Vec<PathBuf>> {
        let (monthly, daily): (Vec<_>, Vec<_>) =
            self.list_backups()?.into_iter().partition(|b| b.is_monthly);

        let expired = daily
            .into_iter()
            .skip(self.retention.daily_count as usize)
            .chain(
                monthly
                    .into_iter()
                    .skip(self.retention.monthly_count as usize),
            );

        let mut deleted = Vec::new();
        for backup in expired {
            fs::remove_file(&backup.path)
                .map_err(|e| LedgerError::Io(format!("Failed to delete old backup: {}", e)))?;
            debug!(file = %backup.filename, "pruned backup");
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    /// Create a backup and then enforce the retention policy
    pub fn create_backup_with_retention(&self) -> LedgerResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Look up a backup by filename
    pub fn get_backup(&self, filename: &str) -> LedgerResult<Option<BackupInfo>> {
        Ok(self
            .list_backups()?
            .into_iter()
            .find(|b| b.filename == filename))
    }

    pub fn get_latest_backup(&self) -> LedgerResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

/// Flag the oldest backup of each month. Expects newest-first order.
fn mark_monthly(backups: &mut [BackupInfo]) {
    let mut seen = HashSet::new();
    for backup in backups.iter_mut().rev() {
        let key = (backup.created_at.year(), backup.created_at.month());
        backup.is_monthly = seen.insert(key);
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename.strip_prefix(FILE_PREFIX)?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        is_monthly: false,
    })
}

/// Read a JSON file as a generic value; a missing file becomes `null`
fn read_json_value(path: &Path) -> LedgerResult<serde_json::Value> {
    if !path.exists() {
        return Ok(serde_json::Value::Null);
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| LedgerError::Io(format!("Failed to read file for backup: {}", e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| LedgerError::Json(format!("Failed to parse JSON for backup: {}", e)))
}

/// Parse `YYYYMMDD-HHMMSS-mmm` (milliseconds optional)
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let mut parts = stamp.split('-');
    let date_part = parts.next()?;
    let time_part = parts.next()?;
    let millis: u32 = match parts.next() {
        Some(ms) => ms.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() || date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let date = NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()?;
    let time = NaiveTime::parse_from_str(time_part, "%H%M%S").ok()?;
    let time = time.with_nanosecond(millis.checked_mul(1_000_000)?)?;

    Some(NaiveDateTime::new(date, time).and_utc())
}
