//! CGM Harmonizer Library
//!
//! Harmonizes heterogeneous continuous glucose monitor (CGM) research
//! dataset exports into canonical per-subject CSV files.
//!
//! This library provides tools for:
//! - Decoding raw exports in their native formats (CSV/TSV, Excel
//!   workbooks, XML event logs, nested JSON documents)
//! - Normalizing timestamps from mixed text formats, spreadsheet serials,
//!   clock times, and minute offsets to a canonical second-precision form
//! - Converting glucose readings to mg/dL with fixed rounding
//! - Partitioning rows into per-subject series with explicit rejection
//!   accounting for every dropped row
//! - Writing the canonical `(timestamp, glucose_value_mg_dl)` CSV contract
//!   with deterministic, idempotent output

pub mod archive;
pub mod config;
pub mod constants;
pub mod datasets;
pub mod error;
pub mod models;
pub mod normalize;
pub mod processor;
pub mod readers;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::HarmonizeConfig;
pub use error::{HarmonizeError, Result};
pub use models::{CanonicalRecord, DatasetStats, SubjectSeries};
pub use processor::DatasetProcessor;
