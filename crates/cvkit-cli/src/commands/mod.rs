//! CLI command implementations.

pub mod aggregate;
pub mod enrich;
pub mod inspect;
pub mod run;
pub mod split;

use colored::Colorize;
use cvkit::{EnrichmentReport, StageStatus};

/// Print one line per file with the outcome of each stage.
pub(crate) fn print_enrichment(report: &EnrichmentReport, verbose: bool) {
    for file in &report.files {
        if let Some(ref reason) = file.aborted {
            println!("  {} {} {}", "✗".red(), file.file, reason.dimmed());
            continue;
        }
        if file.is_complete() {
            if verbose {
                println!("  {} {} ({} rows)", "✓".green(), file.file, file.row_count);
            }
            continue;
        }
        println!("  {} {}", "!".yellow(), file.file);
        for outcome in &file.stages {
            if let StageStatus::Skipped { ref reason, .. } = outcome.status {
                println!("      {} {}", outcome.stage.to_string().yellow(), reason);
            }
        }
    }

    println!(
        "Enriched {} of {} files ({} stages skipped, {} files abandoned)",
        report.complete_count().to_string().white().bold(),
        report.files.len(),
        report.skipped_count().to_string().yellow(),
        report.aborted_count().to_string().red()
    );
}
