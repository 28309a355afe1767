//! XML reader for attribute-based event records.
//!
//! Handles the event-log shape used by sensor study exports: a root element
//! whose attributes identify the subject, containing per-measurement-type
//! sections of self-closing `<event .../>` elements.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::{HarmonizeError, Result};
use crate::models::{RawTable, RawValue};

/// Read every `<event>`-style element inside `container` into a table whose
/// headers are the requested attribute names. Also returns the root
/// element's `root_attr` attribute (the subject identifier in these
/// exports).
pub fn read_attribute_events(
    path: &Path,
    container: &str,
    event: &str,
    attrs: &[&str],
    root_attr: &str,
) -> Result<(String, RawTable)> {
    let xml_err = |reason: String| HarmonizeError::Xml {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = Reader::from_file(path).map_err(|e| xml_err(e.to_string()))?;
    reader.config_mut().trim_text(true);

    let headers: Vec<String> = attrs.iter().map(|a| a.to_string()).collect();
    let mut table = RawTable::new(path.to_path_buf(), headers);
    let mut root_value: Option<String> = None;
    let mut saw_root = false;
    let mut depth_in_container = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.name().as_ref().to_vec();
                if !saw_root {
                    saw_root = true;
                    root_value = attribute_value(&e, root_attr).map_err(&xml_err)?;
                } else if name == container.as_bytes() {
                    depth_in_container += 1;
                } else if depth_in_container > 0 && name == event.as_bytes() {
                    table.rows.push(event_row(&e, attrs).map_err(&xml_err)?);
                }
            }
            Ok(Event::Empty(e)) => {
                if depth_in_container > 0 && e.name().as_ref() == event.as_bytes() {
                    table.rows.push(event_row(&e, attrs).map_err(&xml_err)?);
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == container.as_bytes() && depth_in_container > 0 {
                    depth_in_container -= 1;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_err(e.to_string())),
        }
        buf.clear();
    }

    let root_value = root_value.ok_or_else(|| {
        xml_err(format!("root element has no '{}' attribute", root_attr))
    })?;

    debug!(
        "Read {} events for root {}='{}' from {}",
        table.rows.len(),
        root_attr,
        root_value,
        path.display()
    );

    Ok((root_value, table))
}

fn attribute_value(
    element: &BytesStart<'_>,
    name: &str,
) -> std::result::Result<Option<String>, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn event_row(
    element: &BytesStart<'_>,
    attrs: &[&str],
) -> std::result::Result<Vec<RawValue>, String> {
    let mut row = Vec::with_capacity(attrs.len());
    for name in attrs {
        let cell = match attribute_value(element, name)? {
            Some(value) if !value.trim().is_empty() => RawValue::Text(value),
            _ => RawValue::Empty,
        };
        row.push(cell);
    }
    Ok(row)
}
