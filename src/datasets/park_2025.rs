//! Park 2025: a single CSV holding every subject, with timestamps given as
//! minute offsets from each subject's session start. Offsets anchor to the
//! reference midnight so relative spacing survives in the canonical form.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "park_2025",
        name: "Park_2025",
        raw_dir: "Park_2025_raw_data",
        prepare: None,
        discovery: Discovery::exactly_one("*.csv"),
        format: RawFormat::Delimited { delimiter: b',' },
        timestamp_columns: TimestampColumns::Single(AliasList::new(
            "timestamp",
            &["mins_since_start"],
        )),
        timestamp_rule: TimestampRule::MinutesOffset,
        glucose: AliasList::new("glucose", &["glucose"]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::Column {
            aliases: AliasList::new("subject", &["subject"]),
            numeric_ids: false,
        },
        rules: RowRules::default(),
    })
}
