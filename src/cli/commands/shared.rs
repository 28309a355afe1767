//! Shared components for CLI commands.
//!
//! Logging setup and the batch-level summary type reported after a
//! harmonization run.

use std::time::Duration;

use colored::*;
use tracing::debug;

use crate::models::DatasetStats;

/// Outcome of a batch run across one or more datasets.
///
/// Per-dataset failures are collected rather than propagated, so one broken
/// raw tree never blocks the rest of the batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Completed datasets with their statistics, in run order
    pub succeeded: Vec<(String, DatasetStats)>,
    /// Failed datasets with the rendered failure reason, in run order
    pub failed: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_subjects(&self) -> usize {
        self.succeeded
            .iter()
            .map(|(_, stats)| stats.subjects_written)
            .sum()
    }

    pub fn total_rows(&self) -> usize {
        self.succeeded
            .iter()
            .map(|(_, stats)| stats.rows_written)
            .sum()
    }
}

/// Set up structured logging to stderr
pub fn setup_logging(level: &str, quiet: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cgm_harmonizer={}", level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", level);
}

/// Print the end-of-batch summary
pub fn print_batch_summary(summary: &BatchSummary, elapsed: Duration) {
    println!("\n{}", "Harmonization Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Datasets completed:".bright_cyan(),
        summary.succeeded.len().to_string().bright_white().bold()
    );
    if !summary.failed.is_empty() {
        println!(
            "  {} {}",
            "Datasets failed:".bright_red(),
            summary.failed.len().to_string().bright_red().bold()
        );
        for (name, reason) in &summary.failed {
            println!("    {} {}", name.bright_white(), reason);
        }
    }
    println!(
        "  {} {}",
        "Subjects written:".bright_cyan(),
        summary.total_subjects().to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Rows written:".bright_cyan(),
        summary.total_rows().to_string().bright_white().bold()
    );
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        elapsed.as_millis().to_string().bright_white()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_summary_totals() {
        let mut summary = BatchSummary::default();
        summary.succeeded.push((
            "D1NAMO".to_string(),
            DatasetStats {
                subjects_written: 9,
                rows_written: 1200,
                ..Default::default()
            },
        ));
        summary.succeeded.push((
            "OhioT1DM".to_string(),
            DatasetStats {
                subjects_written: 12,
                rows_written: 800,
                ..Default::default()
            },
        ));
        summary
            .failed
            .push(("AZT1D".to_string(), "no files".to_string()));

        assert_eq!(summary.total_subjects(), 21);
        assert_eq!(summary.total_rows(), 2000);
        assert!(!summary.all_succeeded());
    }
}
