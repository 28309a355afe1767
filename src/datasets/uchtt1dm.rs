//! UCHT T1DM: per-subject `Glucose.xlsx` workbooks. The raw export leaves
//! the timestamp column header blank, so the alias list carries the empty
//! spelling alongside the `Unnamed: 0` name some re-exports give it.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{
    AliasList, RowRules, TimestampColumns, TimestampRule, Unit, MIXED_FALLBACK_FORMATS,
};
use crate::readers::SheetSelect;

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "uchtt1dm",
        name: "UCHTT1DM",
        raw_dir: "UCHTT1DM_raw_data",
        prepare: None,
        discovery: Discovery::many(&["**/Glucose.xlsx"]),
        format: RawFormat::Spreadsheet {
            sheet: SheetSelect::First,
        },
        timestamp_columns: TimestampColumns::Single(AliasList::new(
            "timestamp",
            &["", "Unnamed: 0"],
        )),
        timestamp_rule: TimestampRule::serial_or_text(MIXED_FALLBACK_FORMATS),
        glucose: AliasList::new("glucose", &["Value (mg/dl)"]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::ParentDir,
        rules: RowRules::default(),
    })
}
