//! Explicit per-row normalization.
//!
//! Every raw row either becomes a [`CanonicalRecord`] or is rejected with a
//! reason. Rejections are aggregated per dataset and reported; nothing is
//! dropped silently.

use crate::error::{HarmonizeError, Result};
use crate::models::{CanonicalRecord, RawTable, RawValue, RejectReason, RowOutcome};
use crate::normalize::columns::AliasList;
use crate::normalize::timestamp::{parse_timestamp, TimestampParse, TimestampRule};
use crate::normalize::units::Unit;

/// Where a row's timestamp comes from
#[derive(Debug, Clone)]
pub enum TimestampColumns {
    /// One column holds the full timestamp
    Single(AliasList),
    /// Separate date and time columns, joined with a single space before
    /// parsing
    Split { date: AliasList, time: AliasList },
}

/// Declared row predicates beyond the universal validity invariant
#[derive(Debug, Clone, Default)]
pub struct RowRules {
    /// Drop rows where this column equals this value (lab exports mix
    /// glucose rows with other test codes)
    pub exclude_when: Option<(AliasList, &'static str)>,
    /// Drop leading rows until the first valid glucose reading (sensor
    /// warm-up noise in device logs)
    pub trim_leading_invalid_glucose: bool,
}

enum ResolvedTimestamp {
    Single(usize),
    Split { date: usize, time: usize },
}

/// Row-by-row normalizer for one raw table.
///
/// Column resolution happens once at construction; [`parse_row`] is then a
/// pure per-row step apart from the warm-up trim state.
///
/// [`parse_row`]: RowParser::parse_row
pub struct RowParser<'a> {
    table: &'a RawTable,
    timestamp: ResolvedTimestamp,
    glucose_index: usize,
    rule: &'a TimestampRule,
    unit: Unit,
    exclude_when: Option<(usize, &'static str)>,
    trim_leading: bool,
    seen_valid_glucose: bool,
}

impl<'a> RowParser<'a> {
    /// Resolve the canonical fields against the table's headers. Fails with
    /// a missing-column error naming the field and its aliases.
    pub fn new(
        table: &'a RawTable,
        timestamp_columns: &TimestampColumns,
        glucose: &AliasList,
        rule: &'a TimestampRule,
        unit: Unit,
        rules: &RowRules,
    ) -> Result<Self> {
        let timestamp = match timestamp_columns {
            TimestampColumns::Single(aliases) => ResolvedTimestamp::Single(aliases.require(table)?),
            TimestampColumns::Split { date, time } => ResolvedTimestamp::Split {
                date: date.require(table)?,
                time: time.require(table)?,
            },
        };
        let glucose_index = glucose.require(table)?;
        let exclude_when = match &rules.exclude_when {
            Some((aliases, value)) => Some((aliases.require(table)?, *value)),
            None => None,
        };

        Ok(Self {
            table,
            timestamp,
            glucose_index,
            rule,
            unit,
            exclude_when,
            trim_leading: rules.trim_leading_invalid_glucose,
            seen_valid_glucose: false,
        })
    }

    /// Normalize one row. Glucose validity is checked before the timestamp
    /// is parsed, so junk rows that would be dropped anyway can never
    /// trigger the dataset-fatal unrecognized-timestamp error.
    pub fn parse_row(&mut self, row: &[RawValue]) -> Result<RowOutcome> {
        if let Some((index, value)) = self.exclude_when {
            let cell = self.table.cell(row, index);
            if cell.as_text().as_deref() == Some(value) {
                return Ok(RowOutcome::Rejected(RejectReason::Excluded));
            }
        }

        let glucose_cell = self.table.cell(row, self.glucose_index);
        let glucose = match glucose_cell.as_number() {
            Some(value) => {
                self.seen_valid_glucose = true;
                value
            }
            None => {
                if self.trim_leading && !self.seen_valid_glucose {
                    return Ok(RowOutcome::Rejected(RejectReason::Excluded));
                }
                let reason = if glucose_cell.is_empty() {
                    RejectReason::MissingGlucose
                } else {
                    RejectReason::BadGlucose
                };
                return Ok(RowOutcome::Rejected(reason));
            }
        };

        let timestamp_value = match &self.timestamp {
            ResolvedTimestamp::Single(index) => self.table.cell(row, *index).clone(),
            ResolvedTimestamp::Split { date, time } => {
                let date_cell = self.table.cell(row, *date);
                let time_cell = self.table.cell(row, *time);
                match (date_cell.as_text(), time_cell.as_text()) {
                    (Some(d), Some(t)) => RawValue::Text(format!("{} {}", d, t)),
                    _ => RawValue::Empty,
                }
            }
        };

        match parse_timestamp(&timestamp_value, self.rule) {
            TimestampParse::Parsed(timestamp) => Ok(RowOutcome::Parsed(CanonicalRecord {
                timestamp,
                glucose_mg_dl: self.unit.to_mg_dl(glucose),
            })),
            TimestampParse::Missing => Ok(RowOutcome::Rejected(RejectReason::MissingTimestamp)),
            TimestampParse::Unrecognized(value) => Err(HarmonizeError::TimestampFormat {
                path: self.table.source.clone(),
                value,
            }),
        }
    }
}
