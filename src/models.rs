//! Core data structures for CGM harmonization.
//!
//! Defines the raw tabular form produced by format readers, the canonical
//! record every adapter converges to, per-row rejection outcomes, and the
//! per-dataset processing statistics reported after a run.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::constants::CANONICAL_TIMESTAMP_FORMAT;

/// One cell as read from a source file, before normalization.
///
/// Delimited sources produce only `Text`; spreadsheets additionally produce
/// `Number` and `Serial` (datetime-typed cells kept as raw serial values for
/// the timestamp normalizer).
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Empty,
    Text(String),
    Number(f64),
    Serial(f64),
}

impl RawValue {
    /// Text content, if any. Numbers render in their shortest form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Empty => None,
            RawValue::Text(s) => Some(s.clone()),
            RawValue::Number(n) => Some(format_number(*n)),
            RawValue::Serial(n) => Some(format_number(*n)),
        }
    }

    /// Numeric content: native numbers pass through, text is parsed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Empty => None,
            RawValue::Number(n) | RawValue::Serial(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// One source file decoded into named columns and string/number rows.
/// Ephemeral; owned by the adapter invocation that produced it.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Source path, carried for error reporting
    pub source: PathBuf,
    /// Column headers as they appear in the file (may include an empty name)
    pub headers: Vec<String>,
    /// Row-major cells; rows may be shorter than the header when trailing
    /// cells are absent
    pub rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    pub fn new(source: PathBuf, headers: Vec<String>) -> Self {
        Self {
            source,
            headers,
            rows: Vec::new(),
        }
    }

    /// Cell at (row, column index), `Empty` when the row is short
    pub fn cell<'a>(&'a self, row: &'a [RawValue], index: usize) -> &'a RawValue {
        row.get(index).unwrap_or(&RawValue::Empty)
    }
}

/// The two-field record every dataset converges to.
/// Both fields are always present by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    /// Second precision, no timezone
    pub timestamp: NaiveDateTime,
    /// mg/dL, at most one decimal place
    pub glucose_mg_dl: f64,
}

impl CanonicalRecord {
    /// Timestamp in the canonical `YYYY-MM-DD HH:MM:SS` text form
    pub fn timestamp_text(&self) -> String {
        self.timestamp.format(CANONICAL_TIMESTAMP_FORMAT).to_string()
    }

    /// Glucose with the trailing `.0` suppressed (`90`, not `90.0`)
    pub fn glucose_text(&self) -> String {
        if self.glucose_mg_dl.fract() == 0.0 {
            format!("{}", self.glucose_mg_dl as i64)
        } else {
            format!("{:.1}", self.glucose_mg_dl)
        }
    }
}

/// Why a row was rejected during normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RejectReason {
    /// Timestamp cell blank or absent
    MissingTimestamp,
    /// Glucose cell blank or absent
    MissingGlucose,
    /// Glucose cell present but not numeric
    BadGlucose,
    /// Subject-id cell blank in a one-file-all-subjects export
    MissingSubject,
    /// Dropped by a declared row predicate (lab-test exclusion, warm-up trim)
    Excluded,
}

impl RejectReason {
    pub fn label(&self) -> &'static str {
        match self {
            RejectReason::MissingTimestamp => "missing timestamp",
            RejectReason::MissingGlucose => "missing glucose",
            RejectReason::BadGlucose => "non-numeric glucose",
            RejectReason::MissingSubject => "missing subject id",
            RejectReason::Excluded => "excluded by predicate",
        }
    }
}

/// Outcome of normalizing one raw row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Parsed(CanonicalRecord),
    Rejected(RejectReason),
}

/// One subject's assembled series, ready for emission
#[derive(Debug, Clone)]
pub struct SubjectSeries {
    pub subject_id: String,
    pub records: Vec<CanonicalRecord>,
}

/// Per-dataset processing statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct DatasetStats {
    pub files_read: usize,
    pub files_skipped: usize,
    pub subjects_written: usize,
    pub rows_written: usize,
    pub rows_rejected: usize,
    /// Rejection counts keyed by reason label
    pub rejections: std::collections::BTreeMap<&'static str, usize>,
    #[serde(skip)]
    pub processing_time_ms: u128,
}

impl DatasetStats {
    pub fn record_rejection(&mut self, reason: RejectReason) {
        self.rows_rejected += 1;
        *self.rejections.entry(reason.label()).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: &DatasetStats) {
        self.files_read += other.files_read;
        self.files_skipped += other.files_skipped;
        self.subjects_written += other.subjects_written;
        self.rows_written += other.rows_written;
        self.rows_rejected += other.rows_rejected;
        for (label, count) in &other.rejections {
            *self.rejections.entry(label).or_insert(0) += count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(glucose: f64) -> CanonicalRecord {
        CanonicalRecord {
            timestamp: NaiveDate::from_ymd_opt(2021, 3, 4)
                .unwrap()
                .and_hms_opt(10, 15, 0)
                .unwrap(),
            glucose_mg_dl: glucose,
        }
    }

    #[test]
    fn test_timestamp_text_form() {
        assert_eq!(record(90.0).timestamp_text(), "2021-03-04 10:15:00");
    }

    #[test]
    fn test_glucose_text_suppresses_trailing_zero() {
        assert_eq!(record(90.0).glucose_text(), "90");
        assert_eq!(record(129.6).glucose_text(), "129.6");
    }

    #[test]
    fn test_raw_value_number_parses_text() {
        assert_eq!(RawValue::Text("5.4".into()).as_number(), Some(5.4));
        assert_eq!(RawValue::Text(" 120 ".into()).as_number(), Some(120.0));
        assert_eq!(RawValue::Text("high".into()).as_number(), None);
        assert_eq!(RawValue::Empty.as_number(), None);
    }

    #[test]
    fn test_raw_value_text_renders_integers_bare() {
        assert_eq!(RawValue::Number(954.0).as_text().as_deref(), Some("954"));
        assert_eq!(RawValue::Number(5.4).as_text().as_deref(), Some("5.4"));
    }

    #[test]
    fn test_stats_rejection_counts() {
        let mut stats = DatasetStats::default();
        stats.record_rejection(RejectReason::MissingGlucose);
        stats.record_rejection(RejectReason::MissingGlucose);
        stats.record_rejection(RejectReason::BadGlucose);
        assert_eq!(stats.rows_rejected, 3);
        assert_eq!(stats.rejections["missing glucose"], 2);
        assert_eq!(stats.rejections["non-numeric glucose"], 1);
    }
}
