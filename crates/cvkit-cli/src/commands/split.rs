//! Split command - cut a raw capture into segment tables.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use colored::Colorize;
use cvkit::{Cvkit, PipelineConfig};

pub fn run(
    input: PathBuf,
    directory: PathBuf,
    portion_size: NonZeroUsize,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("File not found: {}", input.display()).into());
    }

    println!(
        "{} {} into portions of {} lines",
        "Splitting".cyan().bold(),
        input.display().to_string().white(),
        portion_size
    );

    let cvkit = Cvkit::with_config(PipelineConfig::default().with_portion_size(portion_size));
    let written = cvkit.split(&input, &directory)?;

    if verbose {
        for path in &written {
            println!("  {} {}", "•".dimmed(), path.display());
        }
    }

    println!(
        "{} {} files in {}",
        "Wrote".green().bold(),
        written.len().to_string().white().bold(),
        directory.display()
    );
    println!(
        "Run {} to add E(RHE) and Current Density",
        format!("cvkit enrich {}", directory.display()).cyan().bold()
    );

    Ok(())
}
