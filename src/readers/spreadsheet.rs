//! Spreadsheet reader for `.xlsx`/`.xls` raw exports.
//!
//! Datetime-typed cells are surfaced as raw serial values so the timestamp
//! normalizer can apply the serial-date conversion and second rounding in
//! one place.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use crate::error::{HarmonizeError, Result};
use crate::models::{RawTable, RawValue};

/// Which worksheet to read from a workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSelect {
    /// First sheet in the workbook
    First,
    /// Sheet named after the file's stem (Shanghai-style exports carry one
    /// sheet per file, named identically)
    FileStem,
}

/// Read one worksheet into a [`RawTable`]. The first row is the header row;
/// fully empty rows are dropped.
pub fn read_spreadsheet(path: &Path, select: SheetSelect) -> Result<RawTable> {
    let spreadsheet_err = |reason: String| HarmonizeError::Spreadsheet {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_err(e.to_string()))?;

    let range = match select {
        SheetSelect::First => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| spreadsheet_err("workbook has no sheets".to_string()))?
            .map_err(|e| spreadsheet_err(e.to_string()))?,
        SheetSelect::FileStem => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            workbook
                .worksheet_range(&stem)
                .map_err(|e| spreadsheet_err(format!("sheet '{}': {}", stem, e)))?
        }
    };

    let table = range_to_table(path, &range);
    debug!(
        "Read {} rows x {} columns from {}",
        table.rows.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Convert a cell range into the raw tabular form
fn range_to_table(path: &Path, range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|header_row| {
            header_row
                .iter()
                .map(|cell| cell_to_value(cell).as_text().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    let mut table = RawTable::new(path.to_path_buf(), headers);

    for row in rows {
        let cells: Vec<RawValue> = row.iter().map(cell_to_value).collect();
        if cells.iter().all(RawValue::is_empty) {
            continue;
        }
        table.rows.push(cells);
    }

    table
}

fn cell_to_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty => RawValue::Empty,
        Data::String(s) => RawValue::Text(s.clone()),
        Data::Float(f) => RawValue::Number(*f),
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::Bool(b) => RawValue::Text(b.to_string()),
        Data::DateTime(dt) => RawValue::Serial(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawValue::Text(s.clone()),
        // Cell-level errors (#N/A and friends) read back as missing
        Data::Error(_) => RawValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_range() -> Range<Data> {
        let mut range = Range::new((0, 0), (3, 1));
        range.set_value((0, 0), Data::String("Date".into()));
        range.set_value((0, 1), Data::String("CGM (mg / dl)".into()));
        range.set_value((1, 0), Data::String("2021-01-01 10:00:00".into()));
        range.set_value((1, 1), Data::Float(112.0));
        range.set_value((2, 0), Data::String("2021-01-01 10:15:00".into()));
        range.set_value((2, 1), Data::Int(118));
        // row 3 left entirely empty
        range
    }

    #[test]
    fn test_first_row_is_header() {
        let table = range_to_table(&PathBuf::from("2045_0.xlsx"), &sample_range());
        assert_eq!(table.headers, vec!["Date", "CGM (mg / dl)"]);
    }

    #[test]
    fn test_empty_rows_dropped() {
        let table = range_to_table(&PathBuf::from("2045_0.xlsx"), &sample_range());
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_numeric_cells_survive_as_numbers() {
        let table = range_to_table(&PathBuf::from("2045_0.xlsx"), &sample_range());
        assert_eq!(table.rows[0][1], RawValue::Number(112.0));
        assert_eq!(table.rows[1][1], RawValue::Number(118.0));
    }

    #[test]
    fn test_empty_header_cell_becomes_empty_name() {
        let mut range = Range::new((0, 0), (1, 1));
        range.set_value((0, 1), Data::String("Value (mg/dl)".into()));
        range.set_value((1, 0), Data::String("2021-01-01 08:00:00".into()));
        range.set_value((1, 1), Data::Float(101.0));

        let table = range_to_table(&PathBuf::from("Glucose.xlsx"), &range);
        assert_eq!(table.headers, vec!["", "Value (mg/dl)"]);
    }

    #[test]
    fn test_missing_file_reports_spreadsheet_error() {
        let result = read_spreadsheet(&PathBuf::from("/nonexistent/Subject1.xlsx"), SheetSelect::First);
        assert!(matches!(
            result,
            Err(HarmonizeError::Spreadsheet { .. })
        ));
    }
}
