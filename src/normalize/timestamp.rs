//! Timestamp normalization.
//!
//! Converts the source representations found across the raw exports —
//! format strings with and without seconds, ISO forms with a literal
//! trailing `Z`, spreadsheet serial dates, bare clock times, and minute
//! offsets — into one canonical `NaiveDateTime` at second precision.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::constants::{ANCHOR_DATE, SECONDS_PER_DAY, SPREADSHEET_EPOCH};
use crate::models::RawValue;

/// Permissive fallback formats, tried in order after a dataset's primary
/// format. Day-first forms precede month-first forms; the primary format
/// has already disambiguated well-formed rows by the time these run.
pub const MIXED_FALLBACK_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// How a dataset's timestamp values are interpreted
#[derive(Debug, Clone)]
pub enum TimestampRule {
    /// Text against an ordered format list, primary first
    Text { formats: Vec<&'static str> },
    /// Spreadsheet cells: serial-typed values convert from the 1900-system
    /// epoch; text falls back to the format list
    SerialOrText { formats: Vec<&'static str> },
    /// Clock time only, anchored to the reference date
    TimeOfDay { format: &'static str },
    /// Minutes since an arbitrary session start, anchored to the reference
    /// midnight
    MinutesOffset,
}

impl TimestampRule {
    pub fn text(formats: &[&'static str]) -> Self {
        TimestampRule::Text {
            formats: formats.to_vec(),
        }
    }

    pub fn serial_or_text(formats: &[&'static str]) -> Self {
        TimestampRule::SerialOrText {
            formats: formats.to_vec(),
        }
    }

    /// Primary format followed by the permissive fallback list
    pub fn text_with_fallbacks(primary: &'static str) -> Self {
        let mut formats = vec![primary];
        formats.extend_from_slice(MIXED_FALLBACK_FORMATS);
        TimestampRule::Text { formats }
    }
}

/// Outcome of normalizing one timestamp value
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampParse {
    Parsed(NaiveDateTime),
    /// Blank source value; the row is rejected
    Missing,
    /// Non-blank value that matched no declared format; dataset-fatal,
    /// since it indicates an unrecognized export format
    Unrecognized(String),
}

/// Normalize one raw value under a dataset's rule
pub fn parse_timestamp(value: &RawValue, rule: &TimestampRule) -> TimestampParse {
    if value.is_empty() {
        return TimestampParse::Missing;
    }

    match rule {
        TimestampRule::Text { formats } => parse_text(value, formats),
        TimestampRule::SerialOrText { formats } => {
            if let RawValue::Serial(serial) | RawValue::Number(serial) = value {
                return match serial_to_datetime(*serial) {
                    Some(dt) => TimestampParse::Parsed(dt),
                    None => TimestampParse::Unrecognized(format!("{}", serial)),
                };
            }
            parse_text(value, formats)
        }
        TimestampRule::TimeOfDay { format } => {
            let text = match value.as_text() {
                Some(t) => t,
                None => return TimestampParse::Missing,
            };
            match NaiveTime::parse_from_str(text.trim(), format) {
                Ok(time) => match anchor_date() {
                    Some(date) => TimestampParse::Parsed(round_to_second(date.and_time(time))),
                    None => TimestampParse::Unrecognized(text),
                },
                Err(_) => TimestampParse::Unrecognized(text),
            }
        }
        TimestampRule::MinutesOffset => match value.as_number().filter(|m| m.is_finite()) {
            Some(minutes) => {
                let seconds = (minutes * 60.0).round() as i64;
                let anchored = Duration::try_seconds(seconds).and_then(|offset| {
                    anchor_date()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .and_then(|midnight| midnight.checked_add_signed(offset))
                });
                match anchored {
                    Some(dt) => TimestampParse::Parsed(dt),
                    None => TimestampParse::Unrecognized(format!("{}", minutes)),
                }
            }
            None => TimestampParse::Unrecognized(value.as_text().unwrap_or_default()),
        },
    }
}

fn parse_text(value: &RawValue, formats: &[&'static str]) -> TimestampParse {
    let text = match value.as_text() {
        Some(t) => t,
        None => return TimestampParse::Missing,
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return TimestampParse::Missing;
    }

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return TimestampParse::Parsed(round_to_second(dt));
        }
    }
    TimestampParse::Unrecognized(trimmed.to_string())
}

/// Spreadsheet serial date (1900 system, epoch 1899-12-30) to datetime,
/// rounded to the nearest whole second. Spreadsheet engines store datetimes
/// as fractional days, which accumulates sub-second floating error.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let (year, month, day) = SPREADSHEET_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    epoch.checked_add_signed(Duration::try_seconds(seconds)?)
}

/// Round sub-second precision to the nearest whole second
pub fn round_to_second(dt: NaiveDateTime) -> NaiveDateTime {
    let truncated = dt.with_nanosecond(0).unwrap_or(dt);
    if dt.nanosecond() >= 500_000_000 {
        truncated
            .checked_add_signed(Duration::seconds(1))
            .unwrap_or(truncated)
    } else {
        truncated
    }
}

fn anchor_date() -> Option<NaiveDate> {
    let (year, month, day) = ANCHOR_DATE;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    fn parsed(rule: &TimestampRule, value: &RawValue) -> String {
        match parse_timestamp(value, rule) {
            TimestampParse::Parsed(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            other => panic!("expected Parsed, got {:?}", other),
        }
    }

    #[test]
    fn test_iso_z_and_day_first_converge() {
        let iso = TimestampRule::text(&["%Y-%m-%dT%H:%M:%SZ"]);
        let day_first = TimestampRule::text(&["%d-%m-%Y %H:%M:%S"]);

        assert_eq!(
            parsed(&iso, &text("2021-03-04T10:15:00Z")),
            "2021-03-04 10:15:00"
        );
        assert_eq!(
            parsed(&day_first, &text("04-03-2021 10:15:00")),
            "2021-03-04 10:15:00"
        );
    }

    #[test]
    fn test_primary_without_seconds() {
        let rule = TimestampRule::text_with_fallbacks("%Y-%m-%d %H:%M");
        assert_eq!(parsed(&rule, &text("2014-10-01 13:07")), "2014-10-01 13:07:00");
    }

    #[test]
    fn test_fallback_rescues_divergent_rows() {
        let rule = TimestampRule::text_with_fallbacks("%Y-%m-%d %H:%M");
        // a stray row carrying seconds still parses via the fallback list
        assert_eq!(
            parsed(&rule, &text("2014-10-01 13:07:30")),
            "2014-10-01 13:07:30"
        );
    }

    #[test]
    fn test_unrecognized_is_not_silently_fabricated() {
        let rule = TimestampRule::text(&["%Y-%m-%dT%H:%M:%SZ"]);
        assert_eq!(
            parse_timestamp(&text("sometime in march"), &rule),
            TimestampParse::Unrecognized("sometime in march".to_string())
        );
    }

    #[test]
    fn test_blank_is_missing() {
        let rule = TimestampRule::text(&["%Y-%m-%d %H:%M:%S"]);
        assert_eq!(parse_timestamp(&RawValue::Empty, &rule), TimestampParse::Missing);
        assert_eq!(parse_timestamp(&text("   "), &rule), TimestampParse::Missing);
    }

    #[test]
    fn test_subsecond_rounding() {
        let rule = TimestampRule::text(&["%Y-%m-%d %H:%M:%S%.f"]);
        assert_eq!(
            parsed(&rule, &text("2022-06-01 08:00:01.499")),
            "2022-06-01 08:00:01"
        );
        assert_eq!(
            parsed(&rule, &text("2022-06-01 08:00:01.500")),
            "2022-06-01 08:00:02"
        );
    }

    #[test]
    fn test_serial_conversion() {
        // 2020-12-16 00:00:00 in the 1900 date system
        let dt = serial_to_datetime(44181.0).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2020-12-16 00:00:00");

        // quarter day = 06:00; floating error rounds away
        let dt = serial_to_datetime(44181.25 + 0.4 / SECONDS_PER_DAY).unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "06:00:00");
    }

    #[test]
    fn test_serial_rejects_negative() {
        assert_eq!(serial_to_datetime(-1.0), None);
    }

    #[test]
    fn test_serial_rejects_out_of_range() {
        // beyond the representable datetime range; must not panic
        assert_eq!(serial_to_datetime(2.0e17), None);
    }

    #[test]
    fn test_time_of_day_anchors_to_reference_date() {
        let rule = TimestampRule::TimeOfDay { format: "%H:%M:%S" };
        assert_eq!(parsed(&rule, &text("10:42:00")), "1900-01-01 10:42:00");
    }

    #[test]
    fn test_minutes_offset_anchors_to_reference_midnight() {
        let rule = TimestampRule::MinutesOffset;
        assert_eq!(parsed(&rule, &text("0")), "1900-01-01 00:00:00");
        assert_eq!(parsed(&rule, &text("95")), "1900-01-01 01:35:00");
        assert_eq!(parsed(&rule, &RawValue::Number(1450.0)), "1900-01-02 00:10:00");
    }

    #[test]
    fn test_minutes_offset_extreme_value_is_unrecognized() {
        // an absurd but numeric offset overflows the duration range; it must
        // surface as an unrecognized value, not panic the worker
        let rule = TimestampRule::MinutesOffset;
        assert!(matches!(
            parse_timestamp(&RawValue::Number(2.0e17), &rule),
            TimestampParse::Unrecognized(_)
        ));
        assert!(matches!(
            parse_timestamp(&RawValue::Number(f64::NAN), &rule),
            TimestampParse::Unrecognized(_)
        ));
    }

    #[test]
    fn test_serial_or_text_accepts_both() {
        let rule = TimestampRule::serial_or_text(&["%Y-%m-%d %H:%M:%S"]);
        assert_eq!(
            parsed(&rule, &RawValue::Serial(44181.25)),
            "2020-12-16 06:00:00"
        );
        assert_eq!(
            parsed(&rule, &text("2020-12-16 06:00:00")),
            "2020-12-16 06:00:00"
        );
    }
}
