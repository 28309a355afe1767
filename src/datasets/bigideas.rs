//! BIG IDEAs Lab: per-subject Dexcom Clarity exports under numbered
//! directories. The export prepends device metadata rows with no glucose
//! reading, trimmed until the first real sample.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

/// Dexcom Clarity column spellings, shared with PhysioCGM
pub const DEXCOM_TIMESTAMP: &str = "Timestamp (YYYY-MM-DDThh:mm:ss)";
pub const DEXCOM_GLUCOSE: &str = "Glucose Value (mg/dL)";

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "bigideas",
        name: "BIGIDEAs",
        raw_dir: "BIGIDEAs_raw_data",
        prepare: None,
        discovery: Discovery::many(&["**/Dexcom_*.csv"]),
        format: RawFormat::Delimited { delimiter: b',' },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &[DEXCOM_TIMESTAMP])),
        timestamp_rule: TimestampRule::text_with_fallbacks("%Y-%m-%dT%H:%M:%S"),
        glucose: AliasList::new("glucose", &[DEXCOM_GLUCOSE]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::ParentDir,
        rules: RowRules {
            exclude_when: None,
            trim_leading_invalid_glucose: true,
        },
    })
}
