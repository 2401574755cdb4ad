//! Flat-file worksheet adapter.
//!
//! The backing table is one named spreadsheet file holding named worksheets;
//! each worksheet is a header row plus string rows. The file and worksheet
//! are created on first use with the fixed column header, and every read
//! re-parses the whole file — no caching, matching the contract in
//! [`crate::store`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::record::{Record, SHEET_COLUMNS};
use crate::store::{RecordStore, StoreError, capa_no_eq};

/// Default spreadsheet file name, relative to the working directory.
pub const DEFAULT_SPREADSHEET_NAME: &str = "CAPA_PORTAL_INDEX.json";
/// Default worksheet tab name inside the spreadsheet.
pub const DEFAULT_WORKSHEET_NAME: &str = "CAPA";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SpreadsheetFile {
    worksheets: BTreeMap<String, Worksheet>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Worksheet {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// A record store backed by one worksheet in a spreadsheet file.
#[derive(Debug)]
pub struct WorksheetRecordStore {
    path: PathBuf,
    worksheet: String,
}

impl WorksheetRecordStore {
    /// Store bound to a spreadsheet file, using the default worksheet name.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_worksheet(path, DEFAULT_WORKSHEET_NAME)
    }

    /// Store bound to a named worksheet inside a spreadsheet file.
    pub fn with_worksheet<P: AsRef<Path>>(path: P, worksheet: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            worksheet: worksheet.into(),
        }
    }

    /// The spreadsheet file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the spreadsheet, creating the file and the worksheet with its
    /// header row when absent.
    fn ensure(&self) -> Result<SpreadsheetFile, StoreError> {
        let mut file = if self.path.exists() {
            let raw = fs::read_to_string(&self.path)?;
            serde_json::from_str(&raw)?
        } else {
            log::info!(
                "creating spreadsheet {} on first use",
                self.path.display()
            );
            SpreadsheetFile::default()
        };

        if !file.worksheets.contains_key(&self.worksheet) {
            log::info!("creating worksheet '{}' with header row", self.worksheet);
            file.worksheets.insert(
                self.worksheet.clone(),
                Worksheet {
                    header: SHEET_COLUMNS.iter().map(|col| col.to_string()).collect(),
                    rows: Vec::new(),
                },
            );
            self.save(&file)?;
        }
        Ok(file)
    }

    fn save(&self, file: &SpreadsheetFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(file)?)?;
        Ok(())
    }

    /// Materialize the worksheet rows as records in the fixed column order.
    ///
    /// The stored header decides which file column feeds which record
    /// column; columns missing from the file read as empty strings and
    /// extra file columns are dropped.
    fn materialize(&self, sheet: &Worksheet) -> Vec<Record> {
        sheet
            .rows
            .iter()
            .map(|row| {
                Record::from_fields(
                    sheet
                        .header
                        .iter()
                        .zip(row.iter())
                        .map(|(col, value)| (col.as_str(), value.as_str())),
                )
            })
            .collect()
    }
}

impl RecordStore for WorksheetRecordStore {
    fn append(&self, record: &Record) -> Result<(), StoreError> {
        let mut file = self.ensure()?;
        let sheet = file
            .worksheets
            .get_mut(&self.worksheet)
            .ok_or_else(|| StoreError::Format(format!("worksheet '{}' missing", self.worksheet)))?;

        let existing = self.materialize(sheet);
        if existing
            .iter()
            .any(|row| capa_no_eq(row.capa_no(), record.capa_no()))
        {
            return Err(StoreError::Duplicate(record.capa_no().trim().to_string()));
        }

        let mut row = record.clone();
        row.normalize_dates();
        sheet.rows.push(row.values().to_vec());
        self.save(&file)?;
        log::debug!(
            "appended CAPA '{}' to {}",
            record.capa_no(),
            self.path.display()
        );
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        let file = self.ensure()?;
        let sheet = file
            .worksheets
            .get(&self.worksheet)
            .ok_or_else(|| StoreError::Format(format!("worksheet '{}' missing", self.worksheet)))?;
        Ok(self.materialize(sheet))
    }

    fn name(&self) -> &'static str {
        "WorksheetRecordStore"
    }
}
