//! Canonical CSV emission.
//!
//! One file per subject under `<output_root>/Standardized-datasets/<name>/`,
//! with the fixed two-column header. Existing files are overwritten, so
//! re-runs are idempotent.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::constants::{subject_filename, CANONICAL_COLUMNS};
use crate::error::{HarmonizeError, Result};
use crate::models::SubjectSeries;

/// Write every subject series into `dataset_dir`. Returns the number of
/// rows written across all subjects.
pub fn write_series(dataset_dir: &Path, series: &[SubjectSeries]) -> Result<usize> {
    fs::create_dir_all(dataset_dir)?;

    let mut rows_written = 0;
    for subject in series {
        rows_written += write_subject(dataset_dir, subject)?;
    }
    Ok(rows_written)
}

fn write_subject(dataset_dir: &Path, subject: &SubjectSeries) -> Result<usize> {
    let path = dataset_dir.join(subject_filename(&subject.subject_id));
    let csv_err = |source: csv::Error| HarmonizeError::Csv {
        path: path.clone(),
        source,
    };

    let mut writer = csv::Writer::from_path(&path).map_err(csv_err)?;
    writer.write_record(CANONICAL_COLUMNS).map_err(csv_err)?;
    for record in &subject.records {
        writer
            .write_record([record.timestamp_text(), record.glucose_text()])
            .map_err(csv_err)?;
    }
    writer.flush()?;

    debug!(
        "Wrote {} rows for subject {} to {}",
        subject.records.len(),
        subject.subject_id,
        path.display()
    );
    Ok(subject.records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CanonicalRecord;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn series(subject_id: &str, values: &[(u32, f64)]) -> SubjectSeries {
        SubjectSeries {
            subject_id: subject_id.to_string(),
            records: values
                .iter()
                .map(|(minute, glucose)| CanonicalRecord {
                    timestamp: NaiveDate::from_ymd_opt(2021, 7, 1)
                        .unwrap()
                        .and_hms_opt(9, *minute, 0)
                        .unwrap(),
                    glucose_mg_dl: *glucose,
                })
                .collect(),
        }
    }

    #[test]
    fn test_writes_canonical_header_and_rows() {
        let dir = TempDir::new().unwrap();

        let rows = write_series(dir.path(), &[series("559", &[(0, 101.0), (5, 129.6)])]).unwrap();

        assert_eq!(rows, 2);
        let written = std::fs::read_to_string(dir.path().join("559.csv")).unwrap();
        assert_eq!(
            written,
            "timestamp,glucose_value_mg_dl\n\
             2021-07-01 09:00:00,101\n\
             2021-07-01 09:05:00,129.6\n"
        );
    }

    #[test]
    fn test_overwrites_previous_output() {
        let dir = TempDir::new().unwrap();

        write_series(dir.path(), &[series("s1", &[(0, 100.0), (5, 105.0)])]).unwrap();
        write_series(dir.path(), &[series("s1", &[(0, 90.0)])]).unwrap();

        let written = std::fs::read_to_string(dir.path().join("s1.csv")).unwrap();
        assert_eq!(written, "timestamp,glucose_value_mg_dl\n2021-07-01 09:00:00,90\n");
    }

    #[test]
    fn test_creates_missing_output_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("Standardized-datasets").join("D1NAMO");

        write_series(&nested, &[series("001", &[(0, 118.8)])]).unwrap();

        assert!(nested.join("001.csv").is_file());
    }
}
