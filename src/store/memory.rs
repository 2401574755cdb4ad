//! In-memory record store.
//!
//! The simplest adapter: rows live in a process-local vector. Used as the
//! unit-test fake and for demos that should not touch the filesystem.

use std::sync::RwLock;

use crate::record::Record;
use crate::store::{RecordStore, StoreError, capa_no_eq};

/// An in-memory backing table.
///
/// Rows must be appended through the store; there is no pre-population step
/// beyond calling [`RecordStore::append`] repeatedly.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    rows: RwLock<Vec<Record>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Number of rows currently stored.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    ///
    /// Returns `true` if the lock is poisoned (safe default).
    pub fn is_empty(&self) -> bool {
        self.rows.read().map(|rows| rows.is_empty()).unwrap_or(true)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn append(&self, record: &Record) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::LockPoisoned)?;
        if rows.iter().any(|row| capa_no_eq(row.capa_no(), record.capa_no())) {
            return Err(StoreError::Duplicate(record.capa_no().trim().to_string()));
        }
        let mut row = record.clone();
        row.normalize_dates();
        rows.push(row);
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(rows.clone())
    }

    fn name(&self) -> &'static str {
        "InMemoryRecordStore"
    }
}
