//! The CAPA record type and its fixed column contract.
//!
//! A record is one CAPA submission: a row of string values over a fixed,
//! ordered set of columns. The column order is significant everywhere a
//! record crosses a boundary (backing table header, template placeholders),
//! so the order defined here is the single source of truth.

use chrono::{NaiveDate, NaiveDateTime};

/// The backing-table column order. Every store adapter writes rows in this
/// order and pads missing columns with empty strings on read.
pub const SHEET_COLUMNS: [&str; 65] = [
    "DEPARTMENT",
    "AREA_SECTION",
    "DATE_OF_INCIDENT",
    "CAPA_NO",
    "WHAT",
    "WHERE",
    "WHEN",
    "EXTENT",
    "TIME1",
    "TIME2",
    "A",
    "B",
    "C",
    "D",
    "TEAM_NAME",
    "LEADER",
    "MEM1",
    "MEM2",
    "MEM3",
    "MEM4",
    "R1",
    "R2",
    "R3",
    "R4",
    "R5",
    "C1",
    "C2",
    "C3",
    "C4",
    "C5",
    "ACTIONS",
    "TIME_FRAME",
    "RESPONSIBILITY",
    "WHY1",
    "WHY2",
    "WHY3",
    "WHY4",
    "WHY5",
    "M1",
    "M2",
    "M3",
    "M4",
    "M5",
    "CONCLUSION",
    "C_ACTIONS",
    "RES1",
    "T1",
    "D1",
    "P_ACTIONS",
    "RES2",
    "T2",
    "D2",
    "PLAN",
    "O1",
    "O2",
    "O3",
    "O4",
    "O5",
    "OTHERS",
    "TRAINING_DETAILS",
    "DATE_IMPLE",
    "EFFECTIVENESS_EVAL",
    "INITIATOR",
    "REVIEWER",
    "HOD",
];

/// Columns that hold only "YES" or "" in storage and render as a checkmark:
/// the four breakdown-duration flags, the five 5M cause flags, and the five
/// modified-document flags.
pub const TICK_COLUMNS: [&str; 14] = [
    "A", "B", "C", "D", "M1", "M2", "M3", "M4", "M5", "O1", "O2", "O3", "O4", "O5",
];

/// Glyph a tick column renders to when its stored value is "YES".
pub const CHECK_MARK: &str = "\u{2714}";

/// Resolve a column name to its position, matching case-insensitively.
pub fn column_index(name: &str) -> Option<usize> {
    SHEET_COLUMNS
        .iter()
        .position(|col| col.eq_ignore_ascii_case(name))
}

/// Whether a column renders through the tick function.
pub fn is_tick_column(name: &str) -> bool {
    TICK_COLUMNS.iter().any(|col| col.eq_ignore_ascii_case(name))
}

/// Map a stored flag value to its rendered form: a trimmed, case-insensitive
/// "YES" becomes a checkmark, anything else becomes empty text.
pub fn tick(value: &str) -> &'static str {
    if value.trim().eq_ignore_ascii_case("YES") {
        CHECK_MARK
    } else {
        ""
    }
}

/// Parse a stored or user-supplied date string into a calendar date.
///
/// Accepts the ISO calendar form the portal writes, a few common manual
/// entry forms, and datetime strings (the date part is kept). Returns `None`
/// for anything unparseable; callers degrade gracefully rather than erroring.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
    for fmt in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(datetime.date());
        }
    }
    None
}

/// One CAPA submission: string values over the fixed column set.
///
/// Values are stored in [`SHEET_COLUMNS`] order, so a record is always a
/// complete row; unset columns are empty strings. Flag columns hold "YES" or
/// "", never a typed boolean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: Vec<String>,
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Record {
    /// Create an empty record (every column set to the empty string).
    pub fn new() -> Self {
        Self {
            values: vec![String::new(); SHEET_COLUMNS.len()],
        }
    }

    /// Build a record from `(column, value)` pairs.
    ///
    /// Column names match case-insensitively; unknown names are ignored and
    /// the last write to a column wins. Missing columns stay empty.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in fields {
            record.set(name.as_ref(), value);
        }
        record
    }

    /// Set a column value. Unknown column names are ignored and reported
    /// via the return value.
    pub fn set(&mut self, column: &str, value: impl Into<String>) -> bool {
        match column_index(column) {
            Some(idx) => {
                self.values[idx] = value.into();
                true
            }
            None => false,
        }
    }

    /// Chainable [`Self::set`] for building records in tests and callers.
    pub fn with(mut self, column: &str, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    /// Get a column value; unknown columns read as empty, matching the
    /// empty-string default for absent data.
    pub fn get(&self, column: &str) -> &str {
        column_index(column)
            .map(|idx| self.values[idx].as_str())
            .unwrap_or("")
    }

    /// The unique identifier column.
    pub fn capa_no(&self) -> &str {
        self.get("CAPA_NO")
    }

    pub fn department(&self) -> &str {
        self.get("DEPARTMENT")
    }

    pub fn area_section(&self) -> &str {
        self.get("AREA_SECTION")
    }

    /// The incident date parsed where possible; unparseable values are
    /// `None` rather than an error.
    pub fn incident_date(&self) -> Option<NaiveDate> {
        parse_date(self.get("DATE_OF_INCIDENT"))
    }

    /// Row values in the fixed column order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Iterate `(column, value)` pairs in the fixed column order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        SHEET_COLUMNS
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Rewrite date-valued columns to the ISO calendar form where they
    /// parse. Applied by stores before a row is appended so the backing
    /// table holds one canonical date format.
    pub fn normalize_dates(&mut self) {
        for column in ["DATE_OF_INCIDENT", "DATE_IMPLE"] {
            if let Some(date) = parse_date(self.get(column)) {
                self.set(column, date.format("%Y-%m-%d").to_string());
            }
        }
    }
}
