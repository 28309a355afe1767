//! Error handling for CGM harmonization operations.
//!
//! Provides error types with context for raw-file discovery, format
//! decoding, and normalization failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarmonizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error in file: {path} - {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Spreadsheet error in file: {path} - {reason}")]
    Spreadsheet { path: PathBuf, reason: String },

    #[error("XML error in file: {path} - {reason}")]
    Xml { path: PathBuf, reason: String },

    #[error("JSON error in file: {path} - {reason}")]
    Json { path: PathBuf, reason: String },

    #[error("Archive extraction failed for {path}: {reason}")]
    Archive { path: PathBuf, reason: String },

    #[error("Unknown dataset identifier: {id}")]
    UnknownDataset { id: String },

    #[error("Raw data directory not found: {path}")]
    RawDirNotFound { path: PathBuf },

    #[error("No raw files matched pattern '{pattern}' under {path}")]
    NoFilesFound { path: PathBuf, pattern: String },

    #[error(
        "Expected exactly one raw file for pattern '{pattern}' under {path}, found {found}"
    )]
    AmbiguousFiles {
        path: PathBuf,
        pattern: String,
        found: usize,
    },

    #[error("Required column missing in file: {path} - no match for {field} among {aliases:?}")]
    MissingColumn {
        path: PathBuf,
        field: &'static str,
        aliases: Vec<String>,
    },

    #[error(
        "Unrecognized timestamp format in file: {path} - value '{value}' matched none of the declared formats"
    )]
    TimestampFormat { path: PathBuf, value: String },

    #[error("Worker task failed: {message}")]
    Task { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl HarmonizeError {
    /// True for errors confined to a single raw file. Datasets that expect
    /// many files skip the offending file and continue; single-file
    /// datasets fail outright. Unrecognized timestamps are never
    /// file-scoped, since they indicate an export format the dataset's
    /// declaration does not cover.
    pub fn is_file_scoped(&self) -> bool {
        matches!(
            self,
            HarmonizeError::Io(_)
                | HarmonizeError::Csv { .. }
                | HarmonizeError::Spreadsheet { .. }
                | HarmonizeError::Xml { .. }
                | HarmonizeError::Json { .. }
                | HarmonizeError::MissingColumn { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, HarmonizeError>;
