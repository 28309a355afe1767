//! JSON reader for nested measurement documents.
//!
//! Wearable-device exports wrap readings in an Open mHealth style envelope:
//! a `body.cgm[]` array whose elements nest the timestamp and value several
//! objects deep. This reader flattens one such array into a table, one row
//! per element, with dotted field paths as the column names.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{HarmonizeError, Result};
use crate::models::{RawTable, RawValue};

/// Read the array at `array_path` (dotted) into a [`RawTable`] whose headers
/// are the given dotted `field_paths`, extracted per element.
pub fn read_json_rows(path: &Path, array_path: &str, field_paths: &[&str]) -> Result<RawTable> {
    let json_err = |reason: String| HarmonizeError::Json {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path)?;
    let document: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| json_err(e.to_string()))?;

    let array = lookup_path(&document, array_path)
        .and_then(Value::as_array)
        .ok_or_else(|| json_err(format!("no array at path '{}'", array_path)))?;

    let headers: Vec<String> = field_paths.iter().map(|p| p.to_string()).collect();
    let mut table = RawTable::new(path.to_path_buf(), headers);

    for element in array {
        let row: Vec<RawValue> = field_paths
            .iter()
            .map(|field| match lookup_path(element, field) {
                Some(Value::String(s)) => RawValue::Text(s.clone()),
                Some(Value::Number(n)) => {
                    n.as_f64().map(RawValue::Number).unwrap_or(RawValue::Empty)
                }
                Some(Value::Bool(b)) => RawValue::Text(b.to_string()),
                _ => RawValue::Empty,
            })
            .collect();
        table.rows.push(row);
    }

    debug!(
        "Read {} readings from {} (array '{}')",
        table.rows.len(),
        path.display(),
        array_path
    );

    Ok(table)
}

/// Walk a dotted path through nested objects
fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}
