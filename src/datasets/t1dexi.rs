//! T1DEXI and its pediatric arm: CDISC-style `LB.csv` lab exports. One
//! file holds every subject; rows partition on `USUBJID`, which the export
//! types as a float (`954.0`). Only CGM rows are kept; the same file also
//! carries HbA1c lab results, excluded on `LBTESTCD`.

use crate::datasets::{DatasetAdapter, DatasetSpec, Discovery, RawFormat, SubjectStrategy};
use crate::normalize::{AliasList, RowRules, TimestampColumns, TimestampRule, Unit};

fn lab_export_spec(id: &'static str, name: &'static str, raw_dir: &'static str) -> DatasetSpec {
    DatasetSpec {
        id,
        name,
        raw_dir,
        prepare: None,
        discovery: Discovery::exactly_one("**/LB.csv"),
        format: RawFormat::Delimited { delimiter: b',' },
        timestamp_columns: TimestampColumns::Single(AliasList::new("timestamp", &["LBDTC"])),
        timestamp_rule: TimestampRule::text_with_fallbacks("%Y-%m-%dT%H:%M:%S"),
        glucose: AliasList::new("glucose", &["LBORRES"]),
        unit: Unit::MgDl,
        subject: SubjectStrategy::Column {
            aliases: AliasList::new("subject", &["USUBJID"]),
            numeric_ids: true,
        },
        rules: RowRules {
            exclude_when: Some((AliasList::new("test code", &["LBTESTCD"]), "HBA1C")),
            trim_leading_invalid_glucose: false,
        },
    }
}

pub fn adapter() -> DatasetAdapter {
    DatasetAdapter::new(lab_export_spec("t1dexi", "T1DEXI", "T1DEXI_raw_data"))
}

pub fn pediatric_adapter() -> DatasetAdapter {
    DatasetAdapter::new(lab_export_spec("t1dexip", "T1DEXIP", "T1DEXIP_raw_data"))
}
