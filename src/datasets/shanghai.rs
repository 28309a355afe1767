//! Shanghai T1DM / T2DM: per-visit Excel workbooks named
//! `<subject>_<visit>_<date>.xlsx`, grouped into subjects by the stem
//! prefix. The T1DM release names each workbook's sheet after the file
//! stem and is strictly `.xlsx`/`.xls`; the T2DM release is read from the
//! first sheet of whatever lands in the directory, so unreadable members
//! skip with a warning rather than failing the dataset. One export
//! generation writes the glucose header with a trailing space.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};
use crate::readers::SheetSelect;

const GLUCOSE_ALIASES: &[&str] = &["CGM (mg / dl)", "CGM "];

fn visit_workbook_spec(
    id: &'static str,
    name: &'static str,
    raw_dir: &'static str,
    patterns: &[&'static str],
    sheet: SheetSelect,
) -> DatasetSpec {
    DatasetSpec {
        id,
        name,
        raw_dir,
        prepare: None,
        discovery: Discovery::many(patterns),
        format: RawFormat::Spreadsheet { sheet },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &["Date"])),
        timestamp_rule: TimestampRule::serial_or_text(&[
            "%Y-%m-%d %H:%M:%S",
            "%Y/%m/%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y/%m/%d %H:%M",
        ]),
        glucose: AliasList::new("glucose", GLUCOSE_ALIASES),
        unit: Unit::MgDl,
        subject: SubjectStrategy::StemPrefix('_'),
        rules: RowRules::default(),
    }
}

pub fn t1dm_adapter() -> DatasetAdapter {
    DatasetAdapter::new(visit_workbook_spec(
        "shanghait1dm",
        "ShanghaiT1DM",
        "Shanghai_raw_data/diabetes_datasets/Shanghai_T1DM",
        &["*.xlsx", "*.xls"],
        SheetSelect::FileStem,
    ))
}

pub fn t2dm_adapter() -> DatasetAdapter {
    DatasetAdapter::new(visit_workbook_spec(
        "shanghait2dm",
        "ShanghaiT2DM",
        "Shanghai_raw_data/diabetes_datasets/Shanghai_T2DM",
        &["*"],
        SheetSelect::First,
    ))
}
