//! Aggregate command - gather derived columns into one workbook.

use std::path::PathBuf;

use colored::Colorize;
use cvkit::Cvkit;

pub fn run(
    directory: PathBuf,
    output: PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !directory.is_dir() {
        return Err(format!("Directory not found: {}", directory.display()).into());
    }

    let cvkit = Cvkit::new();
    let collection = cvkit.aggregate(&directory)?;

    if verbose {
        for (name, table) in collection.iter() {
            println!("  {} {} ({} rows)", "•".dimmed(), name, table.row_count());
        }
    }

    cvkit.export(&collection, &output)?;

    println!(
        "{} {} sheets to {}",
        "Saved".green().bold(),
        collection.len().to_string().white().bold(),
        output.display().to_string().white()
    );
    Ok(())
}
