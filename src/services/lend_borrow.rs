//! Lend/borrow service
//!
//! Same contract shape as the expense service, over the parallel table of
//! money lent to or borrowed from other people.

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::lend_borrow::normalize_status;
use crate::models::{LendBorrow, LendBorrowDraft, LendBorrowId, LendBorrowInput, MonthKey};
use crate::storage::Storage;

/// Service for lend/borrow management
pub struct LendBorrowService<'a> {
    storage: &'a Storage,
    today: NaiveDate,
}

impl<'a> LendBorrowService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            today: Local::now().date_naive(),
        }
    }

    /// Use `today` as the default date for undated entries
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Record a new lend/borrow entry
    pub fn record(&self, input: &LendBorrowInput) -> LedgerResult<LendBorrow> {
        let draft = self.validate(input)?;

        let entry = self.storage.lend_borrow.insert(draft)?;
        self.storage.lend_borrow.save()?;

        info!(
            id = %entry.id,
            kind = %entry.kind,
            name = %entry.name,
            amount = %entry.amount,
            "recorded lend/borrow entry"
        );
        Ok(entry)
    }

    /// Overwrite every field of an existing entry
    pub fn update(&self, id: LendBorrowId, input: &LendBorrowInput) -> LedgerResult<LendBorrow> {
        let mut entry = self.require(id)?;

        entry.overwrite(self.validate(input)?);
        self.storage.lend_borrow.upsert(entry.clone())?;
        self.storage.lend_borrow.save()?;

        info!(id = %id, "updated lend/borrow entry");
        Ok(entry)
    }

    /// Delete an entry, returning what was removed
    pub fn delete(&self, id: LendBorrowId) -> LedgerResult<LendBorrow> {
        let entry = self.require(id)?;

        self.storage.lend_borrow.delete(id)?;
        self.storage.lend_borrow.save()?;

        info!(id = %id, "deleted lend/borrow entry");
        Ok(entry)
    }

    /// Change only the status; a blank status resets to the default
    pub fn set_status(&self, id: LendBorrowId, status: &str) -> LedgerResult<LendBorrow> {
        let mut entry = self.require(id)?;

        entry.status = normalize_status(Some(status));
        self.storage.lend_borrow.upsert(entry.clone())?;
        self.storage.lend_borrow.save()?;

        info!(id = %id, status = %entry.status, "changed lend/borrow status");
        Ok(entry)
    }

    pub fn get(&self, id: LendBorrowId) -> LedgerResult<Option<LendBorrow>> {
        self.storage.lend_borrow.get(id)
    }

    /// Entries in a month, newest first
    pub fn list_for_month(&self, month: MonthKey) -> LedgerResult<Vec<LendBorrow>> {
        self.storage.lend_borrow.get_by_month(month)
    }

    /// Every entry, newest first
    pub fn list_all(&self) -> LedgerResult<Vec<LendBorrow>> {
        self.storage.lend_borrow.get_all()
    }

    fn require(&self, id: LendBorrowId) -> LedgerResult<LendBorrow> {
        self.storage
            .lend_borrow
            .get(id)?
            .ok_or_else(|| LedgerError::lend_borrow_not_found(id.to_string()))
    }

    fn validate(&self, input: &LendBorrowInput) -> LedgerResult<LendBorrowDraft> {
        LendBorrowDraft::from_input(input, self.today)
            .map_err(|e| LedgerError::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{LendBorrowKind, Money};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn service(storage: &Storage) -> LendBorrowService<'_> {
        LendBorrowService::new(storage).with_today(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap())
    }

    #[test]
    fn test_record_defaults_status() {
        let (_temp_dir, storage) = create_test_storage();
        let entry = service(&storage)
            .record(&LendBorrowInput::new("Ravi", "250", "Lend"))
            .unwrap();

        assert_eq!(entry.status, "Pending");
        assert_eq!(entry.kind, LendBorrowKind::Lend);
        assert_eq!(entry.amount, Money::from_cents(25_000));
    }

    #[test]
    fn test_record_rejects_unknown_type() {
        let (_temp_dir, storage) = create_test_storage();
        let err = service(&storage)
            .record(&LendBorrowInput::new("Ravi", "250", "Gift"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.lend_borrow.count().unwrap(), 0);
    }

    #[test]
    fn test_update_and_status() {
        let (_temp_dir, storage) = create_test_storage();
        let svc = service(&storage);
        let entry = svc.record(&LendBorrowInput::new("Ravi", "250", "Lend")).unwrap();

        let updated = svc
            .update(entry.id, &LendBorrowInput::new("Ravi", "300", "Borrow"))
            .unwrap();
        assert_eq!(updated.kind, LendBorrowKind::Borrow);

        let settled = svc.set_status(entry.id, " Returned ").unwrap();
        assert_eq!(settled.status, "Returned");
        assert_eq!(settled.amount, Money::from_cents(30_000));

        let reset = svc.set_status(entry.id, "").unwrap();
        assert_eq!(reset.status, "Pending");
    }

    #[test]
    fn test_missing_entry_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let svc = service(&storage);
        let id = LendBorrowId::new(7);

        assert!(svc.delete(id).unwrap_err().is_not_found());
        assert!(svc.set_status(id, "Paid").unwrap_err().is_not_found());
        assert!(svc
            .update(id, &LendBorrowInput::new("A", "1", "Lend"))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_list_for_month() {
        let (_temp_dir, storage) = create_test_storage();
        let svc = service(&storage);
        svc.record(&LendBorrowInput::new("A", "1", "Lend").date("2024-04-01"))
            .unwrap();
        svc.record(&LendBorrowInput::new("B", "2", "Borrow").date("2024-05-01"))
            .unwrap();

        let may = svc.list_for_month(MonthKey::new(2024, 5).unwrap()).unwrap();
        assert_eq!(may.len(), 1);
        assert_eq!(may[0].name, "B");
        assert_eq!(svc.list_all().unwrap().len(), 2);
    }
}
