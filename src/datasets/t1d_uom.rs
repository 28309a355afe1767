//! T1D-UOM: per-subject CSVs with a `time` timestamp and mmol/L `cgm`
//! readings.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "t1d-uom",
        name: "T1D-UOM",
        raw_dir: "T1D-UOM_raw_data",
        prepare: None,
        discovery: Discovery::many(&["**/*.csv"]),
        format: RawFormat::Delimited { delimiter: b',' },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &["time"])),
        timestamp_rule: TimestampRule::text_with_fallbacks("%Y-%m-%d %H:%M:%S"),
        glucose: AliasList::new("glucose", &["cgm"]),
        unit: Unit::MmolL,
        subject: SubjectStrategy::FileStem,
        rules: RowRules::default(),
    })
}
