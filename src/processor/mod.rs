//! Harmonization engine.
//!
//! Orchestrates one dataset end to end: archive preparation, raw-file
//! discovery, concurrent decoding and normalization, subject assembly, and
//! canonical CSV emission.

pub mod assemble;
pub mod ingest;
pub mod writer;

use std::path::PathBuf;
use std::time::Instant;

use colored::*;
use tokio::task;

use crate::config::HarmonizeConfig;
use crate::datasets::DatasetAdapter;
use crate::error::{HarmonizeError, Result};
use crate::models::DatasetStats;

/// Drives the full pipeline for one dataset
#[derive(Debug)]
pub struct DatasetProcessor {
    adapter: DatasetAdapter,
    config: HarmonizeConfig,
}

impl DatasetProcessor {
    pub fn new(adapter: DatasetAdapter, config: HarmonizeConfig) -> Self {
        Self { adapter, config }
    }

    /// Run the dataset through the pipeline and report its statistics
    pub async fn process(&self) -> Result<DatasetStats> {
        let start_time = Instant::now();
        let raw_dir = self.config.raw_dir(self.adapter.spec().raw_dir);
        let dataset_dir = self.config.output_dir().join(self.adapter.name());

        println!(
            "{} {}",
            "Harmonizing".bright_green().bold(),
            self.adapter.name().bright_white().bold()
        );
        println!("  {} {}", "Raw data:".bright_cyan(), raw_dir.display());
        println!("  {} {}", "Output:".bright_cyan(), dataset_dir.display());

        // Step 1: unpack archives the dataset ships zipped
        let files = self.prepare_and_discover(raw_dir).await?;
        println!(
            "  {} {} raw file(s)",
            "Found".bright_green(),
            files.len().to_string().bright_white().bold()
        );

        // Step 2: decode and normalize concurrently
        let (file_groups, mut stats) =
            ingest::read_files(&self.adapter, &files, self.config.workers).await?;

        // Step 3: assemble per-subject series and emit canonical CSVs
        let series = assemble::merge_subjects(file_groups);
        stats.subjects_written = series.len();
        stats.rows_written = {
            let dataset_dir = dataset_dir.clone();
            task::spawn_blocking(move || writer::write_series(&dataset_dir, &series))
                .await
                .unwrap_or_else(|e| {
                    Err(HarmonizeError::Task {
                        message: e.to_string(),
                    })
                })?
        };
        stats.processing_time_ms = start_time.elapsed().as_millis();

        self.print_summary(&stats);
        Ok(stats)
    }

    async fn prepare_and_discover(&self, raw_dir: PathBuf) -> Result<Vec<PathBuf>> {
        let adapter = self.adapter.clone();
        task::spawn_blocking(move || {
            adapter.prepare(&raw_dir)?;
            adapter.discover_files(&raw_dir)
        })
        .await
        .unwrap_or_else(|e| {
            Err(HarmonizeError::Task {
                message: e.to_string(),
            })
        })
    }

    fn print_summary(&self, stats: &DatasetStats) {
        println!(
            "  {} {} subject(s), {} row(s) in {}ms",
            "Wrote".bright_green(),
            stats.subjects_written.to_string().bright_white().bold(),
            stats.rows_written.to_string().bright_white().bold(),
            stats.processing_time_ms
        );
        if stats.files_skipped > 0 {
            println!(
                "  {} {} unreadable file(s)",
                "Skipped".bright_yellow(),
                stats.files_skipped.to_string().bright_yellow().bold()
            );
        }
        if stats.rows_rejected > 0 {
            let breakdown: Vec<String> = stats
                .rejections
                .iter()
                .map(|(label, count)| format!("{}: {}", label, count))
                .collect();
            println!(
                "  {} {} row(s) ({})",
                "Rejected".bright_yellow(),
                stats.rows_rejected.to_string().bright_yellow().bold(),
                breakdown.join(", ")
            );
        }
    }
}
