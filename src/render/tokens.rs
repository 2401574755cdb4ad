//! Placeholder tokens and the per-record substitution map.

use crate::record::{self, Record, SHEET_COLUMNS};

/// The template token for a column: the name in double braces, matched
/// case-sensitively.
pub fn placeholder(column: &str) -> String {
    format!("{{{{{column}}}}}")
}

/// Build the full substitution map for a record, in column order.
///
/// Every column contributes one `(token, value)` pair; tick columns go
/// through the tick function, everything else is the stored string (absent
/// values are already empty strings).
pub fn substitution_map(record: &Record) -> Vec<(String, String)> {
    SHEET_COLUMNS
        .iter()
        .map(|column| {
            let value = record.get(column);
            let rendered = if record::is_tick_column(column) {
                record::tick(value).to_string()
            } else {
                value.to_string()
            };
            (placeholder(column), rendered)
        })
        .collect()
}
