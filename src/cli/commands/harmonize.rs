//! Harmonize command implementation.
//!
//! Resolves the requested adapters, validates configuration, then runs the
//! datasets sequentially with per-dataset failure isolation.

use std::time::Instant;

use anyhow::Context;
use colored::*;
use tracing::{error, info};

use crate::cli::args::HarmonizeArgs;
use crate::cli::commands::shared::{self, BatchSummary};
use crate::config::HarmonizeConfig;
use crate::datasets::{self, DatasetAdapter};
use crate::processor::DatasetProcessor;

pub async fn run_harmonize(args: HarmonizeArgs) -> anyhow::Result<BatchSummary> {
    shared::setup_logging(args.get_log_level(), args.quiet);

    // Unknown identifiers and bad roots abort before anything is written
    let adapters = resolve_adapters(&args.datasets)?;
    let show_progress = args.show_progress();
    let mut config = HarmonizeConfig::default()
        .with_raw_root(args.raw_root)
        .with_output_root(args.output_root);
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    config.validate().context("invalid configuration")?;

    info!(
        "Harmonizing {} dataset(s) with {} worker(s)",
        adapters.len(),
        config.workers
    );

    let start = Instant::now();
    let mut summary = BatchSummary::default();
    for adapter in adapters {
        let name = adapter.name().to_string();
        let processor = DatasetProcessor::new(adapter, config.clone());
        match processor.process().await {
            Ok(stats) => summary.succeeded.push((name, stats)),
            Err(e) => {
                error!("Dataset {} failed: {}", name, e);
                println!(
                    "  {} {} - {}",
                    "Failed".bright_red().bold(),
                    name.bright_white().bold(),
                    e
                );
                summary.failed.push((name, e.to_string()));
            }
        }
        println!();
    }

    if show_progress {
        shared::print_batch_summary(&summary, start.elapsed());
    }
    Ok(summary)
}

/// Resolve dataset identifiers against the registry; an empty selection
/// means every registered dataset
fn resolve_adapters(ids: &[String]) -> anyhow::Result<Vec<DatasetAdapter>> {
    if ids.is_empty() {
        return Ok(datasets::registry());
    }
    ids.iter()
        .map(|id| {
            datasets::find(id).with_context(|| {
                format!(
                    "unknown dataset '{}' (run `cgm-harmonizer datasets` for the registry)",
                    id
                )
            })
        })
        .collect()
}
