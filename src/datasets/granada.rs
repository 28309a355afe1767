//! T1DiabetesGranada: one glucose-measurements CSV holding every subject,
//! with separate date and time columns and a `Patient_ID` partition key.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "t1diabetesgranada",
        name: "T1DiabetesGranada",
        raw_dir: "T1DiabetesGranada_raw_data",
        prepare: None,
        discovery: Discovery::exactly_one("*cose_measurements.csv"),
        format: RawFormat::Delimited { delimiter: b',' },
        timestamp_columns: TimestampColumns::Split {
            date: AliasList::new("date", &["Measurement_date"]),
            time: AliasList::new("time", &["Measurement_time"]),
        },
        timestamp_rule: TimestampRule::text_with_fallbacks("%Y-%m-%d %H:%M:%S"),
        glucose: AliasList::new("glucose", &["Measurement"]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::Column {
            aliases: AliasList::new("subject", &["Patient_ID"]),
            numeric_ids: false,
        },
        rules: RowRules::default(),
    })
}
