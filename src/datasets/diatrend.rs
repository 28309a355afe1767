//! DiaTrend: per-subject Excel workbooks. The `date` column arrives as
//! native spreadsheet datetimes (serials), occasionally as text in older
//! workbooks; serials are rounded to the whole second.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{
    AliasList, RowRules, TimestampColumns, TimestampRule, Unit, MIXED_FALLBACK_FORMATS,
};
use crate::readers::SheetSelect;

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(DatasetSpec {
        id: "diatrend",
        name: "DiaTrend",
        raw_dir: "DiaTrend_raw_data",
        prepare: None,
        discovery: Discovery::many(&["**/Subject*.xlsx"]),
        format: RawFormat::Spreadsheet {
            sheet: SheetSelect::First,
        },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &["date"])),
        timestamp_rule: TimestampRule::serial_or_text(MIXED_FALLBACK_FORMATS),
        glucose: AliasList::new("glucose", &["mg/dl"]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::FileStem,
        rules: RowRules::default(),
    })
}
