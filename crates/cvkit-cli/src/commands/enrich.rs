//! Enrich command - add metadata and derived columns to segment tables.

use std::path::PathBuf;

use colored::Colorize;
use cvkit::{Cvkit, PipelineConfig};

use crate::cli::MetadataArgs;

pub fn run(
    directory: PathBuf,
    metadata: MetadataArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !directory.is_dir() {
        return Err(format!("Directory not found: {}", directory.display()).into());
    }

    let metadata = metadata.resolve()?;
    println!(
        "{} {}",
        "Enriching".cyan().bold(),
        directory.display().to_string().white()
    );
    if verbose {
        println!(
            "  NHE={} pH={} Constant={} Area={} R={}",
            metadata.nhe, metadata.ph, metadata.constant, metadata.area_cm2, metadata.resistance
        );
    }

    let cvkit = Cvkit::with_config(PipelineConfig::default().with_metadata(metadata));
    let report = cvkit.enrich(&directory)?;

    super::print_enrichment(&report, verbose);
    Ok(())
}
