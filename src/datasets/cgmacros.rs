//! CGMacros: one date-shifted zip holding per-subject directories, each
//! with a combined CSV logging two sensors at their own cadences. The
//! Dexcom and Libre columns are published as separate datasets sharing the
//! same raw directory; rows where the selected sensor has no reading
//! reject as missing glucose.

use crate::datasets::{
    DatasetAdapter, DatasetSpec, Discovery, Prepare, RawFormat, SubjectStrategy,
};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

fn sensor_spec(id: &'static str, name: &'static str, glucose_column: &'static str) -> DatasetSpec {
    DatasetSpec {
        id,
        name,
        raw_dir: "CGMacros_raw_data",
        prepare: Some(Prepare::UnzipMatching("CGMacros_dateshifted*.zip")),
        discovery: Discovery::many(&["**/*/CGMacros-*.csv"]),
        format: RawFormat::Delimited { delimiter: b',' },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &["Timestamp"])),
        timestamp_rule: TimestampRule::text_with_fallbacks("%Y-%m-%d %H:%M:%S"),
        glucose: AliasList::new("glucose", &[glucose_column]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::ParentDir,
        rules: RowRules::default(),
    }
}

pub fn dexcom_adapter() -> DatasetAdapter {
    DatasetAdapter::new(sensor_spec("cgmacros_dexcom", "CGMacros_Dexcom", "Dexcom GL"))
}

pub fn libre_adapter() -> DatasetAdapter {
    DatasetAdapter::new(sensor_spec("cgmacros_libre", "CGMacros_Libre", "Libre GL"))
}
