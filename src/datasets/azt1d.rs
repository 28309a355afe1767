//! AZT1D: a 2025 zip release with per-subject directories under
//! `CGM Records`. The export renamed its glucose column between revisions,
//! so both spellings are accepted.

use crate::datasets::{
    DatasetAdapter, DatasetSpec, Discovery, Prepare, RawFormat, SubjectStrategy,
};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "azt1d",
        name: "AZT1D",
        raw_dir: "AZT1D_raw_data",
        prepare: Some(Prepare::UnzipMatching("*2025.zip")),
        discovery: Discovery::many(&["**/*Diabetes/AZT1D 2025/CGM Records/**/*.csv"]),
        format: RawFormat::Delimited { delimiter: b',' },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &["EventDateTime"])),
        timestamp_rule: TimestampRule::text_with_fallbacks("%Y-%m-%d %H:%M:%S"),
        glucose: AliasList::new("glucose", &["Readings (CGM / BGM)", "CGM"]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::ParentDir,
        rules: RowRules::default(),
    })
}
