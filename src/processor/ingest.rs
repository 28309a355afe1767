//! Concurrent raw-file ingestion.
//!
//! Files decode and normalize on blocking worker threads with bounded
//! parallelism. Results are re-ordered to discovery order before merging,
//! so concurrency never changes the output.

use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task;
use tracing::{debug, warn};

use crate::datasets::{DatasetAdapter, Multiplicity};
use crate::error::{HarmonizeError, Result};
use crate::models::{CanonicalRecord, DatasetStats};

/// Per-file record groups, in discovery order
pub type FileGroups = Vec<Vec<(String, Vec<CanonicalRecord>)>>;

/// Read and normalize every discovered file.
///
/// File-scoped failures in many-file datasets are skipped with a warning;
/// single-file datasets and dataset-scoped failures (unrecognized
/// timestamp formats) abort the whole dataset.
pub async fn read_files(
    adapter: &DatasetAdapter,
    files: &[PathBuf],
    workers: usize,
) -> Result<(FileGroups, DatasetStats)> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message("Reading raw files");

    let concurrency = workers.min(files.len()).max(1);
    debug!(
        "Reading {} files with {} workers",
        files.len(),
        concurrency
    );

    let mut results = stream::iter(files.iter().cloned().enumerate())
        .map(|(index, path)| {
            let adapter = adapter.clone();
            let pb = pb.clone();
            async move {
                if let Some(name) = path.file_name() {
                    pb.set_message(format!("Reading: {}", name.to_string_lossy()));
                }
                let task_path = path.clone();
                let outcome = task::spawn_blocking(move || read_one(&adapter, &task_path))
                    .await
                    .unwrap_or_else(|e| {
                        Err(HarmonizeError::Task {
                            message: e.to_string(),
                        })
                    });
                pb.inc(1);
                (index, path, outcome)
            }
        })
        .buffer_unordered(concurrency)
        .collect::<Vec<_>>()
        .await;
    pb.finish_and_clear();

    // completion order is nondeterministic under concurrency
    results.sort_by_key(|(index, _, _)| *index);

    let many_files = adapter.spec().discovery.multiplicity == Multiplicity::ManyFiles;
    let mut file_groups = Vec::new();
    let mut stats = DatasetStats::default();
    for (_, path, outcome) in results {
        match outcome {
            Ok((groups, file_stats)) => {
                stats.merge(&file_stats);
                file_groups.push(groups);
            }
            Err(e) if many_files && e.is_file_scoped() => {
                warn!("Skipping {}: {}", path.display(), e);
                stats.files_skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok((file_groups, stats))
}

fn read_one(
    adapter: &DatasetAdapter,
    path: &Path,
) -> Result<(Vec<(String, Vec<CanonicalRecord>)>, DatasetStats)> {
    let mut stats = DatasetStats::default();
    let file = adapter.read(path)?;
    stats.files_read += 1;
    let groups = adapter.partition_subjects(&file, &mut stats)?;
    debug!(
        "Normalized {}: {} subject group(s), {} rejected row(s)",
        path.display(),
        groups.len(),
        stats.rows_rejected
    );
    Ok((groups, stats))
}
