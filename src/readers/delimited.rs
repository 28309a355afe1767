//! Delimited text reader for comma- and tab-separated raw exports.

use std::path::Path;

use tracing::debug;

use crate::error::{HarmonizeError, Result};
use crate::models::{RawTable, RawValue};

/// Read a delimited file into a [`RawTable`].
///
/// Headers are kept verbatim, including an empty leading header when the
/// export carries an unnamed index column. Short rows are tolerated; the
/// missing trailing cells read back as empty.
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|e| HarmonizeError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| HarmonizeError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .iter()
        // some exports open with a UTF-8 BOM glued to the first header
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut table = RawTable::new(path.to_path_buf(), headers);

    for result in reader.records() {
        let record = result.map_err(|e| HarmonizeError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        let row: Vec<RawValue> = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    RawValue::Empty
                } else {
                    RawValue::Text(field.to_string())
                }
            })
            .collect();
        table.rows.push(row);
    }

    debug!(
        "Read {} rows x {} columns from {}",
        table.rows.len(),
        table.headers.len(),
        path.display()
    );

    Ok(table)
}
