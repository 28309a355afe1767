//! D1NAMO: per-subject `glucose.csv` files nested under the diabetes
//! subset directories, with separate `date` and `time` columns and mmol/L
//! readings. The subject id is the file's parent directory name.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "d1namo",
        name: "D1NAMO",
        raw_dir: "D1NAMO_raw_data",
        prepare: None,
        discovery: Discovery::many(&["**/diabetes_subset*/*/glucose.csv"]),
        format: RawFormat::Delimited { delimiter: b',' },
        timestamp_columns: TimestampColumns::Split {
            date: AliasList::new("date", &["date"]),
            time: AliasList::new("time", &["time"]),
        },
        timestamp_rule: TimestampRule::text_with_fallbacks("%Y-%m-%d %H:%M"),
        glucose: AliasList::new("glucose", &["glucose"]),
        unit: Unit::MmolL,
        subject: SubjectStrategy::ParentDir,
        rules: RowRules::default(),
    })
}
