//! Column resolution against per-dataset alias lists.
//!
//! Each canonical field carries an ordered list of acceptable source names;
//! the first alias present in a file's header wins. This absorbs exports
//! that rename a column between device generations without any per-file
//! conditionals in the adapters.

use crate::error::{HarmonizeError, Result};
use crate::models::RawTable;

/// Ordered source-name aliases for one canonical field
#[derive(Debug, Clone)]
pub struct AliasList {
    /// Canonical field label, for error reporting
    pub field: &'static str,
    /// Acceptable source names, in preference order. Matching is exact —
    /// an alias may legitimately be empty or carry trailing whitespace,
    /// both of which occur in real exports.
    pub names: Vec<String>,
}

impl AliasList {
    pub fn new(field: &'static str, names: &[&str]) -> Self {
        Self {
            field,
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Index of the first alias present among the headers
    pub fn resolve(&self, headers: &[String]) -> Option<usize> {
        self.names
            .iter()
            .find_map(|name| headers.iter().position(|h| h == name))
    }

    /// Resolve or fail with a missing-column error for the table's file
    pub fn require(&self, table: &RawTable) -> Result<usize> {
        self.resolve(&table.headers)
            .ok_or_else(|| HarmonizeError::MissingColumn {
                path: table.source.clone(),
                field: self.field,
                aliases: self.names.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_first_present_alias_wins() {
        let aliases = AliasList::new("glucose", &["Readings (CGM / BGM)", "CGM"]);

        let h = headers(&["EventDateTime", "Readings (CGM / BGM)", "CGM"]);
        assert_eq!(aliases.resolve(&h), Some(1));

        let h = headers(&["EventDateTime", "CGM"]);
        assert_eq!(aliases.resolve(&h), Some(1));
    }

    #[test]
    fn test_exact_match_preserves_trailing_space() {
        let aliases = AliasList::new("glucose", &["CGM (mg / dl)", "CGM "]);

        let h = headers(&["Date", "CGM "]);
        assert_eq!(aliases.resolve(&h), Some(1));

        // the bare spelling is not in the list and must not match
        let h = headers(&["Date", "CGM"]);
        assert_eq!(aliases.resolve(&h), None);
    }

    #[test]
    fn test_empty_header_alias() {
        let aliases = AliasList::new("timestamp", &["", "Unnamed: 0"]);
        let h = headers(&["", "Value (mg/dl)"]);
        assert_eq!(aliases.resolve(&h), Some(0));
    }

    #[test]
    fn test_require_reports_field_and_aliases() {
        let aliases = AliasList::new("glucose", &["glucemia"]);
        let table = RawTable::new(PathBuf::from("subject3.csv"), headers(&["hora", "pulso"]));

        match aliases.require(&table) {
            Err(HarmonizeError::MissingColumn { field, aliases, .. }) => {
                assert_eq!(field, "glucose");
                assert_eq!(aliases, vec!["glucemia".to_string()]);
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }
}
