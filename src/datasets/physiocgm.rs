//! PhysioCGM: per-subject `cgm.csv` files under `<subject>_raw`
//! directories, in Dexcom Clarity form. Timestamps carry floating-point
//! sub-second noise and round to the whole second; device metadata rows at
//! the top of each export trim away.

use crate::datasets::bigideas::{DEXCOM_GLUCOSE, DEXCOM_TIMESTAMP};
use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "physiocgm",
        name: "PhysioCGM",
        raw_dir: "PhysioCGM_raw_data",
        prepare: None,
        discovery: Discovery::many(&["**/*_raw/cgm.csv"]),
        format: RawFormat::Delimited { delimiter: b',' },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &[DEXCOM_TIMESTAMP])),
        timestamp_rule: TimestampRule::text_with_fallbacks("%Y-%m-%dT%H:%M:%S%.f"),
        glucose: AliasList::new("glucose", &[DEXCOM_GLUCOSE]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::ParentDirStripSuffix("_raw"),
        rules: RowRules {
            exclude_when: None,
            trim_leading_invalid_glucose: true,
        },
    })
}
