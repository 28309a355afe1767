//! Colas 2019: one CSV per subject, named for the subject. Timestamps are
//! clock times only (`hora`), anchored to the reference date; readings that
//! wrap past midnight come out unordered and rely on the output sort.
//! Files without the expected columns (the cohort mixes in non-CGM exports)
//! are skipped with a warning.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "colas_2019",
        name: "Colas_2019",
        raw_dir: "Colas_2019_raw_data",
        prepare: None,
        discovery: Discovery::many(&["**/*.csv"]),
        format: RawFormat::Delimited { delimiter: b',' },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &["hora"])),
        timestamp_rule: TimestampRule::TimeOfDay { format: "%H:%M:%S" },
        glucose: AliasList::new("glucose", &["glucemia"]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::FileStem,
        rules: RowRules::default(),
    })
}
