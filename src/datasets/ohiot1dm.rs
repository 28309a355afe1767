//! OhioT1DM: XML event logs, one or more files per subject. Glucose
//! readings live under `<glucose_level>` as `<event ts=".." value=".."/>`
//! elements; the `<patient id="..">` root attribute names the subject, so
//! training and testing files for the same id merge into one series.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "ohiot1dm",
        name: "OhioT1DM",
        raw_dir: "OhioT1DM_raw_data",
        prepare: None,
        discovery: Discovery::many(&["**/*.xml"]),
        format: RawFormat::XmlEvents {
            container: "glucose_level",
            event: "event",
            timestamp_attr: "ts",
            value_attr: "value",
            root_attr: "id",
        },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &["ts"])),
        timestamp_rule: TimestampRule::text_with_fallbacks("%d-%m-%Y %H:%M:%S"),
        glucose: AliasList::new("glucose", &["value"]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::FileLabel,
        rules: RowRules::default(),
    })
}
