//! Command implementations for the CGM harmonizer CLI.
//!
//! Each command lives in its own module; `shared` holds the logging setup
//! and the batch summary reporting they have in common.

pub mod datasets;
pub mod harmonize;
pub mod shared;

pub use shared::BatchSummary;

use crate::cli::args::{Args, Commands};

/// Dispatch to the requested subcommand.
///
/// Returns the batch summary so the binary can derive its exit code: a
/// batch where any dataset failed exits non-zero even though the run
/// itself completed.
pub async fn run(args: Args) -> anyhow::Result<BatchSummary> {
    match args.command {
        Some(Commands::Harmonize(harmonize_args)) => {
            harmonize::run_harmonize(harmonize_args).await
        }
        Some(Commands::Datasets(datasets_args)) => {
            datasets::run_datasets(datasets_args).await?;
            Ok(BatchSummary::default())
        }
        None => {
            // clap prints help for bare invocations via the binary
            Ok(BatchSummary::default())
        }
    }
}
