//! Applying the enrichment stages to tables on disk.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::aggregate::numbered_tables;
use crate::error::Result;
use crate::input::{ExperimentTable, TableLoader};

use super::metadata::ExperimentMetadata;
use super::report::{EnrichmentReport, FileReport, StageOutcome};
use super::stages::Stage;

/// Rows shown in debug previews.
const PREVIEW_ROWS: usize = 5;

/// Runs the four stages on each file, loading and saving around every stage.
#[derive(Debug, Clone)]
pub struct EnrichmentPipeline {
    loader: TableLoader,
    metadata: ExperimentMetadata,
}

impl EnrichmentPipeline {
    /// Create a pipeline with the given experiment constants.
    pub fn new(metadata: ExperimentMetadata) -> Self {
        Self {
            loader: TableLoader::new(),
            metadata,
        }
    }

    /// Use a custom table loader.
    pub fn with_loader(mut self, loader: TableLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn metadata(&self) -> &ExperimentMetadata {
        &self.metadata
    }

    /// Run every stage on an in-memory table without touching the filesystem.
    pub fn apply(&self, table: &mut ExperimentTable) -> Vec<StageOutcome> {
        Stage::ALL
            .iter()
            .map(|stage| match stage.apply(table, &self.metadata) {
                Ok(()) => StageOutcome::applied(*stage),
                Err(e) => {
                    warn!("{}", e);
                    StageOutcome::skipped(*stage, &e)
                }
            })
            .collect()
    }

    /// Enrich one file in place.
    ///
    /// Each stage reloads the file, so a rejected stage leaves the file as the previous stage
    /// saved it. A load or save failure abandons the remaining stages for this file.
    pub fn enrich_file(&self, path: impl AsRef<Path>) -> FileReport {
        let path = path.as_ref();
        let mut report = FileReport::new(path);
        info!("Processing file: {}", path.display());

        for stage in Stage::ALL {
            let mut table = match self.loader.load(path) {
                Ok(table) => table,
                Err(e) => {
                    warn!("{}", e);
                    report.aborted = Some(e.to_string());
                    break;
                }
            };

            if let Err(e) = stage.apply(&mut table, &self.metadata) {
                warn!("{}", e);
                report.stages.push(StageOutcome::skipped(stage, &e));
                continue;
            }

            if let Err(e) = self.loader.save(&table, path) {
                warn!("{}", e);
                report.stages.push(StageOutcome::skipped(stage, &e));
                report.aborted = Some(e.to_string());
                break;
            }

            debug!(
                "{} applied to {}:\n{}",
                stage,
                report.file,
                table.preview(PREVIEW_ROWS)
            );
            report.row_count = table.row_count();
            report.stages.push(StageOutcome::applied(stage));
        }

        info!("Finished processing file: {}", path.display());
        report
    }

    /// Enrich files in the given order.
    pub fn enrich_files(&self, paths: &[PathBuf]) -> EnrichmentReport {
        let mut report = EnrichmentReport::new();
        for path in paths {
            report.push(self.enrich_file(path));
        }
        report
    }

    /// Enrich every table with `extension` in `directory`, in numeric filename order.
    pub fn enrich_directory(
        &self,
        directory: impl AsRef<Path>,
        extension: &str,
    ) -> Result<EnrichmentReport> {
        let paths: Vec<PathBuf> = numbered_tables(directory.as_ref(), extension)?
            .into_iter()
            .map(|(_, path)| path)
            .collect();
        Ok(self.enrich_files(&paths))
    }
}

impl Default for EnrichmentPipeline {
    fn default() -> Self {
        Self::new(ExperimentMetadata::default())
    }
}
