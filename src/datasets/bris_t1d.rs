//! Bris-T1D open release: per-subject CSVs under `processed_state`
//! directories, with mmol/L `bg` readings.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "bris-t1d_open",
        name: "Bris-T1D_Open",
        raw_dir: "Bris-T1D_Open_raw_data",
        prepare: None,
        discovery: Discovery::many(&["**/processed_state/*.csv"]),
        format: RawFormat::Delimited { delimiter: b',' },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &["timestamp"])),
        timestamp_rule: TimestampRule::text_with_fallbacks("%Y-%m-%d %H:%M:%S"),
        glucose: AliasList::new("glucose", &["bg"]),
        unit: Unit::MmolL,
        subject: SubjectStrategy::FileStem,
        rules: RowRules::default(),
    })
}
