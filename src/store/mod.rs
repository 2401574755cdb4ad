//! Record storage behind a trait seam.
//!
//! The portal core never talks to a concrete backing table directly; it goes
//! through [`RecordStore`], so the same logic runs against the flat-file
//! worksheet adapter in production and the in-memory fake in tests.
//!
//! Lookup and query both operate over a fresh full-table read — there is no
//! local cache or incremental sync, by contract with the backing store.

pub mod memory;
pub mod worksheet;

pub use memory::InMemoryRecordStore;
pub use worksheet::WorksheetRecordStore;

use chrono::Duration;
use thiserror::Error;

use crate::record::{self, Record};

/// Error type for backing-table operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A record with this CAPA number already exists in the table.
    #[error("CAPA number '{0}' is already taken")]
    Duplicate(String),

    #[error("backing table I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backing table format error: {0}")]
    Format(String),

    #[error("record store lock poisoned")]
    LockPoisoned,
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Format(err.to_string())
    }
}

/// Multi-field filter for [`RecordStore::query`].
///
/// Text filters are case-insensitive substring matches; all present filters
/// are ANDed together and omitted filters pass every row. Date bounds that
/// do not parse are ignored rather than raised as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub department: Option<String>,
    pub area: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    pub fn end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    /// Whether a record passes every present filter.
    ///
    /// The end date is padded by one day so a row stamped anywhere on the
    /// end day is still included after time-of-day truncation.
    pub fn matches(&self, rec: &Record) -> bool {
        if let Some(dept) = &self.department
            && !contains_ci(rec.department(), dept)
        {
            return false;
        }
        if let Some(area) = &self.area
            && !contains_ci(rec.area_section(), area)
        {
            return false;
        }

        let start = self.start_date.as_deref().and_then(record::parse_date);
        let end = self.end_date.as_deref().and_then(record::parse_date);
        if start.is_none() && end.is_none() {
            return true;
        }
        // An active date filter excludes rows without a parseable date.
        let Some(date) = rec.incident_date() else {
            return false;
        };
        if let Some(start) = start
            && date < start
        {
            return false;
        }
        if let Some(end) = end
            && date > end + Duration::days(1)
        {
            return false;
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Equality used for CAPA-number lookup and uniqueness: surrounding
/// whitespace is ignored and the comparison is case-insensitive.
pub(crate) fn capa_no_eq(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// A backing table of CAPA records.
///
/// # Implementations
///
/// - [`WorksheetRecordStore`]: flat-file worksheet, created on first use.
/// - [`InMemoryRecordStore`]: in-process fake for unit tests.
pub trait RecordStore: Send + Sync {
    /// Append one record as a new row in the fixed column order.
    ///
    /// The caller has already validated that the CAPA number is non-empty.
    /// Appending a CAPA number that is already present (ignoring case and
    /// surrounding whitespace) fails with [`StoreError::Duplicate`] and
    /// leaves the table unchanged. There is no update operation.
    fn append(&self, record: &Record) -> Result<(), StoreError>;

    /// Re-read the entire backing table.
    ///
    /// Every returned record carries the full fixed column set, with
    /// columns absent from the backing store padded as empty strings. An
    /// empty table is an empty vector, not an error.
    fn fetch_all(&self) -> Result<Vec<Record>, StoreError>;

    /// First record whose CAPA number matches, ignoring case and
    /// surrounding whitespace.
    fn find_by_capa_no(&self, capa_no: &str) -> Result<Option<Record>, StoreError> {
        Ok(self
            .fetch_all()?
            .into_iter()
            .find(|rec| capa_no_eq(rec.capa_no(), capa_no)))
    }

    /// All records passing the filter, in table order.
    fn query(&self, query: &RecordQuery) -> Result<Vec<Record>, StoreError> {
        Ok(self
            .fetch_all()?
            .into_iter()
            .filter(|rec| query.matches(rec))
            .collect())
    }

    /// Human-readable adapter name for logging.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(dept: &str, area: &str, date: &str) -> Record {
        Record::new()
            .with("DEPARTMENT", dept)
            .with("AREA_SECTION", area)
            .with("DATE_OF_INCIDENT", date)
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = RecordQuery::new();
        assert!(query.matches(&rec("", "", "")));
        assert!(query.matches(&rec("Engineering", "Line 1", "2025-01-01")));
    }

    #[test]
    fn test_department_substring_case_insensitive() {
        let query = RecordQuery::new().department("eng");
        assert!(query.matches(&rec("Engineering", "", "")));
        assert!(query.matches(&rec("engineering ops", "", "")));
        assert!(!query.matches(&rec("Sales", "", "")));
    }

    #[test]
    fn test_filters_are_anded() {
        let query = RecordQuery::new().department("eng").area("line");
        assert!(query.matches(&rec("Engineering", "Line 3", "")));
        assert!(!query.matches(&rec("Engineering", "Packing", "")));
    }

    #[test]
    fn test_end_date_inclusive_with_one_day_pad() {
        let query = RecordQuery::new()
            .start_date("2025-01-01")
            .end_date("2025-01-31");
        assert!(query.matches(&rec("", "", "2025-01-31")));
        assert!(query.matches(&rec("", "", "2025-01-01")));
        assert!(!query.matches(&rec("", "", "2025-02-02")));
        assert!(!query.matches(&rec("", "", "2024-12-31")));
    }

    #[test]
    fn test_unparseable_date_filter_is_ignored() {
        let query = RecordQuery::new().start_date("whenever");
        assert!(query.matches(&rec("", "", "2020-01-01")));
        assert!(query.matches(&rec("", "", "")));
    }

    #[test]
    fn test_date_filter_excludes_rows_without_parseable_date() {
        let query = RecordQuery::new().start_date("2025-01-01");
        assert!(!query.matches(&rec("", "", "")));
        assert!(!query.matches(&rec("", "", "unknown")));
        assert!(query.matches(&rec("", "", "2025-06-01")));
    }

    #[test]
    fn test_capa_no_eq_trims_and_ignores_case() {
        assert!(capa_no_eq(" capa-2025-001 ", "CAPA-2025-001"));
        assert!(!capa_no_eq("CAPA-2025-001", "CAPA-2025-002"));
    }
}
