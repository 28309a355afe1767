//! HUPA-UCM: per-subject semicolon-delimited exports named `HUPA<n>P.csv`,
//! with a full `time` timestamp and mg/dL `glucose` readings.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "hupa-ucm",
        name: "HUPA-UCM",
        raw_dir: "HUPA-UCM_raw_data",
        prepare: None,
        discovery: Discovery::many(&["**/HUPA*.csv"]),
        format: RawFormat::Delimited { delimiter: b';' },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &["time"])),
        timestamp_rule: TimestampRule::text_with_fallbacks("%Y-%m-%d %H:%M:%S"),
        glucose: AliasList::new("glucose", &["glucose"]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::FileStem,
        rules: RowRules::default(),
    })
}
