//! Lend/borrow repository for JSON storage
//!
//! Manages loading and saving lend/borrow entries to lend_borrow.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{LendBorrow, LendBorrowDraft, LendBorrowId, MonthKey};

use super::file_io::{read_json, write_json_atomic};
use super::poisoned;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct LendBorrowData {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    entries: Vec<LendBorrow>,
}

#[derive(Debug, Default)]
struct LendBorrowState {
    next_id: u64,
    rows: BTreeMap<LendBorrowId, LendBorrow>,
}

fn newest_first(a: &LendBorrow, b: &LendBorrow) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then(b.id.cmp(&a.id))
}

/// Repository for lend/borrow persistence
pub struct LendBorrowRepository {
    path: PathBuf,
    state: RwLock<LendBorrowState>,
}

impl LendBorrowRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(LendBorrowState::default()),
        }
    }

    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: LendBorrowData = read_json(&self.path)?;
        let mut state = self.state.write().map_err(poisoned)?;

        state.rows = file_data.entries.into_iter().map(|e| (e.id, e)).collect();
        let floor = state.rows.keys().next_back().map_or(0, |id| id.get());
        state.next_id = file_data.next_id.max(floor);

        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let state = self.state.read().map_err(poisoned)?;

        let mut entries: Vec<_> = state.rows.values().cloned().collect();
        entries.sort_by(newest_first);

        write_json_atomic(
            &self.path,
            &LendBorrowData {
                next_id: state.next_id,
                entries,
            },
        )
    }

    pub fn get(&self, id: LendBorrowId) -> Result<Option<LendBorrow>, LedgerError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.rows.get(&id).cloned())
    }

    /// All entries, newest first
    pub fn get_all(&self) -> Result<Vec<LendBorrow>, LedgerError> {
        let state = self.state.read().map_err(poisoned)?;
        let mut entries: Vec<_> = state.rows.values().cloned().collect();
        entries.sort_by(newest_first);
        Ok(entries)
    }

    /// Entries dated within a calendar month, newest first
    pub fn get_by_month(&self, month: MonthKey) -> Result<Vec<LendBorrow>, LedgerError> {
        let mut entries = self.get_all()?;
        entries.retain(|e| month.contains(e.date));
        Ok(entries)
    }

    pub fn insert(&self, draft: LendBorrowDraft) -> Result<LendBorrow, LedgerError> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.next_id += 1;
        let entry = LendBorrow::from_draft(LendBorrowId::new(state.next_id), draft);
        state.rows.insert(entry.id, entry.clone());
        Ok(entry)
    }

    pub fn upsert(&self, entry: LendBorrow) -> Result<(), LedgerError> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.next_id = state.next_id.max(entry.id.get());
        state.rows.insert(entry.id, entry);
        Ok(())
    }

    pub fn delete(&self, id: LendBorrowId) -> Result<bool, LedgerError> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(state.rows.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.rows.len())
    }
}
