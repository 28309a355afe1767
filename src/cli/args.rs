//! Command-line argument definitions for the CGM harmonizer.
//!
//! Defines the complete CLI interface using the clap derive API.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::constants::DEFAULT_RAW_ROOT;

/// CLI arguments for the CGM harmonizer
///
/// Harmonizes heterogeneous CGM research dataset exports into canonical
/// per-subject CSV files with a fixed two-column schema.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cgm-harmonizer",
    version,
    about = "Harmonize CGM research datasets into canonical per-subject CSV files",
    long_about = "Ingests raw continuous glucose monitor (CGM) dataset exports in their native \
                  formats (CSV/TSV, Excel, XML, JSON), normalizes timestamps and glucose units, \
                  and writes one canonical (timestamp, glucose_value_mg_dl) CSV per subject \
                  under Standardized-datasets/."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Harmonize one or more datasets into canonical per-subject CSVs
    Harmonize(HarmonizeArgs),
    /// List the registered datasets and their formats
    Datasets(DatasetsArgs),
}

/// Arguments for the harmonize command
#[derive(Debug, Clone, Parser)]
pub struct HarmonizeArgs {
    /// Dataset identifiers to harmonize
    ///
    /// If none are given, every registered dataset is processed. Use the
    /// `datasets` subcommand to list valid identifiers.
    #[arg(value_name = "DATASETS")]
    pub datasets: Vec<String>,

    /// Root directory holding the raw dataset downloads
    ///
    /// Each dataset is expected under its conventional directory inside
    /// this root (for example `<raw-root>/D1NAMO_raw_data`).
    #[arg(
        long = "raw-root",
        value_name = "PATH",
        default_value = DEFAULT_RAW_ROOT,
        help = "Root directory containing the raw dataset downloads"
    )]
    pub raw_root: PathBuf,

    /// Root directory for harmonized output
    ///
    /// Canonical CSVs are written under
    /// `<output-root>/Standardized-datasets/<DatasetName>/`.
    #[arg(
        long = "output-root",
        value_name = "PATH",
        default_value = ".",
        help = "Root directory for harmonized output"
    )]
    pub output_root: PathBuf,

    /// Number of parallel workers
    ///
    /// Controls how many raw files are decoded concurrently within a
    /// dataset. Defaults to the number of CPUs.
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of parallel workers for file decoding"
    )]
    pub workers: Option<usize>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl HarmonizeArgs {
    /// Tracing filter level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Progress bars and console summaries are suppressed in quiet mode
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Arguments for the datasets listing command
#[derive(Debug, Clone, Parser)]
pub struct DatasetsArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

impl DatasetsArgs {
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_harmonize_with_datasets() {
        let args = Args::try_parse_from([
            "cgm-harmonizer",
            "harmonize",
            "d1namo",
            "ohiot1dm",
            "--raw-root",
            "/data/raw",
            "-j",
            "4",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Harmonize(h)) => {
                assert_eq!(h.datasets, vec!["d1namo", "ohiot1dm"]);
                assert_eq!(h.raw_root, PathBuf::from("/data/raw"));
                assert_eq!(h.workers, Some(4));
            }
            other => panic!("expected harmonize command, got {:?}", other),
        }
    }

    #[test]
    fn test_harmonize_defaults() {
        let args = Args::try_parse_from(["cgm-harmonizer", "harmonize"]).unwrap();

        match args.command {
            Some(Commands::Harmonize(h)) => {
                assert!(h.datasets.is_empty());
                assert_eq!(h.raw_root, PathBuf::from(DEFAULT_RAW_ROOT));
                assert_eq!(h.output_root, PathBuf::from("."));
                assert_eq!(h.workers, None);
            }
            other => panic!("expected harmonize command, got {:?}", other),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["cgm-harmonizer", "harmonize", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level_mapping() {
        let mut args = match Args::try_parse_from(["cgm-harmonizer", "harmonize"])
            .unwrap()
            .command
        {
            Some(Commands::Harmonize(h)) => h,
            _ => unreachable!(),
        };

        assert_eq!(args.get_log_level(), "warn");
        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");
        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");
        args.verbose = 5;
        assert_eq!(args.get_log_level(), "trace");
        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }
}
