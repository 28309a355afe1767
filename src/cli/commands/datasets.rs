//! Datasets listing command implementation.

use colored::*;

use crate::cli::args::DatasetsArgs;
use crate::cli::commands::shared;
use crate::datasets::{self, Multiplicity};

pub async fn run_datasets(args: DatasetsArgs) -> anyhow::Result<()> {
    shared::setup_logging(args.get_log_level(), false);

    let registry = datasets::registry();
    println!(
        "{} ({} registered)",
        "Datasets".bright_green().bold(),
        registry.len()
    );
    for adapter in &registry {
        let spec = adapter.spec();
        let multiplicity = match spec.discovery.multiplicity {
            Multiplicity::ExactlyOneFile => "single file",
            Multiplicity::ManyFiles => "many files",
        };
        println!(
            "  {:<20} {:<20} {:<6} {:<12} {}",
            spec.id.bright_white().bold(),
            spec.name,
            spec.format_label(),
            spec.unit.label(),
            multiplicity
        );
    }
    Ok(())
}
