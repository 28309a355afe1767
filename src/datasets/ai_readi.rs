//! AI-READI: per-subject Dexcom JSON documents. Readings live at
//! `body.cgm[]` with nested effective-time and value fields; timestamps
//! are strict UTC ISO-8601 with a literal `Z`.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

const TIMESTAMP_PATH: &str = "effective_time_frame.time_interval.start_date_time";
const VALUE_PATH: &str = "blood_glucose.value";

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "ai-readi",
        name: "AI-READI",
        raw_dir: "AI-READI_raw_data",
        prepare: None,
        discovery: Discovery::many(&["**/*_DEX.json"]),
        format: RawFormat::JsonDocument {
            array_path: "body.cgm",
            timestamp_path: TIMESTAMP_PATH,
            value_path: VALUE_PATH,
        },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &[TIMESTAMP_PATH])),
        timestamp_rule: TimestampRule::text(&["%Y-%m-%dT%H:%M:%SZ"]),
        glucose: AliasList::new("glucose", &[VALUE_PATH]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::ParentDir,
        rules: RowRules::default(),
    })
}
