//! Hall 2018: a single tab-delimited export holding every subject.
//!
//! Rows carry `DisplayTime`, `GlucoseValue` and `subjectId`; partitioning
//! happens on the subject column. Anything other than exactly one matching
//! file is an error.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "hall_2018",
        name: "Hall_2018",
        raw_dir: "Hall_2018_raw_data",
        prepare: None,
        discovery: Discovery::exactly_one("pbio.*.s*"),
        format: RawFormat::Delimited { delimiter: b'\t' },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &["DisplayTime"])),
        timestamp_rule: TimestampRule::text_with_fallbacks("%Y-%m-%d %H:%M:%S"),
        glucose: AliasList::new("glucose", &["GlucoseValue"]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::Column {
            aliases: AliasList::new("subject", &["subjectId"]),
            numeric_ids: false,
        },
        rules: RowRules::default(),
    })
}
