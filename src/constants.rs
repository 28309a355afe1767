//! Application constants for the CGM harmonizer
//!
//! This module contains the canonical output contract, unit conversion
//! constants, and path conventions used throughout the application.

// =============================================================================
// Canonical Output Contract
// =============================================================================

/// Canonical output column names, in emission order
pub const CANONICAL_COLUMNS: &[&str] = &["timestamp", "glucose_value_mg_dl"];

/// Canonical timestamp text form, second precision, no timezone
pub const CANONICAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output directory name under the output root
pub const OUTPUT_DIR_NAME: &str = "Standardized-datasets";

// =============================================================================
// Unit Conversion Constants
// =============================================================================

/// Fixed mmol/L to mg/dL conversion factor for glucose
pub const MMOL_TO_MG_FACTOR: f64 = 18.0;

/// Decimal places retained after unit conversion
pub const GLUCOSE_DECIMAL_PLACES: u32 = 1;

// =============================================================================
// Timestamp Reference Constants
// =============================================================================

/// Anchor date for time-of-day and minute-offset sources (year, month, day).
/// Sources that carry only a clock time or an offset are pinned to this date
/// so their output remains a well-formed datetime.
pub const ANCHOR_DATE: (i32, u32, u32) = (1900, 1, 1);

/// Spreadsheet serial date epoch (year, month, day). Serial 1.0 is one day
/// after this date, matching the 1900 date system with its leap-year quirk.
pub const SPREADSHEET_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Seconds per day, for serial date conversion
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// =============================================================================
// Raw Data Path Conventions
// =============================================================================

/// Default raw-data root directory
pub const DEFAULT_RAW_ROOT: &str = "Original-Glucose-ML-datasets";

/// Suffix appended to a dataset name to form its raw directory
pub const RAW_DIR_SUFFIX: &str = "_raw_data";

// =============================================================================
// Helper Functions
// =============================================================================

/// Default raw directory name for a dataset (overridden by datasets that
/// share a raw download)
pub fn default_raw_dir(dataset_name: &str) -> String {
    format!("{}{}", dataset_name, RAW_DIR_SUFFIX)
}

/// Output filename for a subject
pub fn subject_filename(subject_id: &str) -> String {
    format!("{}.csv", subject_id)
}

/// Canonical CSV header line
pub fn canonical_header() -> String {
    CANONICAL_COLUMNS.join(",")
}
