//! Run command - split, enrich and aggregate in one pass.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use colored::Colorize;
use cvkit::{Cvkit, PipelineConfig};

use crate::cli::MetadataArgs;

pub fn run(
    input: PathBuf,
    directory: PathBuf,
    output: PathBuf,
    portion_size: NonZeroUsize,
    metadata: MetadataArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("File not found: {}", input.display()).into());
    }

    let config = PipelineConfig::default()
        .with_portion_size(portion_size)
        .with_metadata(metadata.resolve()?);
    let summary = Cvkit::with_config(config).run(&input, &directory, &output)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {} ({} lines, {} bytes)",
        "Processed".cyan().bold(),
        input.display().to_string().white(),
        summary.input_lines,
        summary.input_bytes
    );
    println!(
        "Wrote {} segment files to {}",
        summary.segments.len().to_string().white().bold(),
        directory.display()
    );
    super::print_enrichment(&summary.enrichment, false);
    println!();
    println!(
        "{} {} sheets to {}",
        "Saved".green().bold(),
        summary.sheets.len().to_string().white().bold(),
        summary.output.display().to_string().white()
    );
    Ok(())
}
