//! Subject series assembly.
//!
//! Merges per-file record groups into one series per subject and enforces
//! the output ordering contract: every series is time-ascending. The sort
//! is stable, so sources that already arrive ordered pass through
//! byte-identically and equal timestamps keep their source order.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{CanonicalRecord, SubjectSeries};
use crate::processor::ingest::FileGroups;

/// Merge file-level groups into per-subject series, sorted by subject id.
/// Subjects with no surviving records are dropped, never written as empty
/// files.
pub fn merge_subjects(file_groups: FileGroups) -> Vec<SubjectSeries> {
    let mut merged: BTreeMap<String, Vec<CanonicalRecord>> = BTreeMap::new();
    for groups in file_groups {
        for (subject, records) in groups {
            merged.entry(subject).or_default().extend(records);
        }
    }

    let mut series = Vec::with_capacity(merged.len());
    for (subject_id, mut records) in merged {
        if records.is_empty() {
            debug!("Subject {} has no surviving records; dropped", subject_id);
            continue;
        }
        records.sort_by_key(|r| r.timestamp);
        series.push(SubjectSeries {
            subject_id,
            records,
        });
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(minute: u32, glucose: f64) -> CanonicalRecord {
        CanonicalRecord {
            timestamp: NaiveDate::from_ymd_opt(2021, 7, 1)
                .unwrap()
                .and_hms_opt(9, minute, 0)
                .unwrap(),
            glucose_mg_dl: glucose,
        }
    }

    #[test]
    fn test_merges_same_subject_across_files() {
        let file_groups = vec![
            vec![("559".to_string(), vec![record(10, 100.0), record(15, 104.0)])],
            vec![("559".to_string(), vec![record(0, 98.0)])],
        ];

        let series = merge_subjects(file_groups);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].subject_id, "559");
        let minutes: Vec<u32> = series[0]
            .records
            .iter()
            .map(|r| chrono::Timelike::minute(&r.timestamp))
            .collect();
        assert_eq!(minutes, vec![0, 10, 15]);
    }

    #[test]
    fn test_subjects_sorted_and_empty_dropped() {
        let file_groups = vec![vec![
            ("b".to_string(), vec![record(0, 90.0)]),
            ("a".to_string(), vec![record(0, 95.0)]),
            ("c".to_string(), vec![]),
        ]];

        let series = merge_subjects(file_groups);

        let ids: Vec<&str> = series.iter().map(|s| s.subject_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_stable_sort_keeps_source_order_for_ties() {
        let file_groups = vec![
            vec![("s".to_string(), vec![record(5, 111.0)])],
            vec![("s".to_string(), vec![record(5, 222.0)])],
        ];

        let series = merge_subjects(file_groups);

        let values: Vec<f64> = series[0].records.iter().map(|r| r.glucose_mg_dl).collect();
        assert_eq!(values, vec![111.0, 222.0]);
    }
}
