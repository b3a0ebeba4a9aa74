//! Main Cvkit struct and public API.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateCollection, Aggregator, SpreadsheetExporter};
use crate::enrich::{EnrichmentPipeline, EnrichmentReport, ExperimentMetadata};
use crate::error::Result;
use crate::input::{LoaderConfig, TableLoader};
use crate::segment::{RawInput, SegmentWriter};

/// Lines per experiment in the instrument's export.
pub const DEFAULT_PORTION_SIZE: usize = 2401;

/// Configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Raw lines per segment, including the stale header line.
    pub portion_size: NonZeroUsize,
    /// File name prefix for segment tables.
    pub file_prefix: String,
    /// File extension for segment tables.
    pub extension: String,
    /// Constants merged into every table.
    pub metadata: ExperimentMetadata,
    /// Delimited file settings.
    pub loader: LoaderConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            portion_size: NonZeroUsize::new(DEFAULT_PORTION_SIZE).unwrap_or(NonZeroUsize::MIN),
            file_prefix: "output_part".to_string(),
            extension: "csv".to_string(),
            metadata: ExperimentMetadata::default(),
            loader: LoaderConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_portion_size(mut self, portion_size: NonZeroUsize) -> Self {
        self.portion_size = portion_size;
        self
    }

    pub fn with_metadata(mut self, metadata: ExperimentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }
}

/// Summary of an end-to-end run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Raw input file.
    pub input: PathBuf,
    /// SHA-256 hash of the raw input.
    pub input_hash: String,
    /// Size of the raw input in bytes.
    pub input_bytes: u64,
    /// Number of raw lines read.
    pub input_lines: usize,
    /// Segment tables written, in order.
    pub segments: Vec<PathBuf>,
    /// Per-file enrichment outcomes.
    pub enrichment: EnrichmentReport,
    /// Sheet names in the exported workbook.
    pub sheets: Vec<String>,
    /// Workbook path.
    pub output: PathBuf,
    /// When the run finished.
    pub completed_at: DateTime<Utc>,
}

/// The segmentation, enrichment and aggregation pipeline.
pub struct Cvkit {
    config: PipelineConfig,
    pipeline: EnrichmentPipeline,
    aggregator: Aggregator,
    exporter: SpreadsheetExporter,
}

impl Cvkit {
    /// Create an instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        let loader = TableLoader::with_config(config.loader.clone());
        let pipeline = EnrichmentPipeline::new(config.metadata).with_loader(loader.clone());
        let aggregator = Aggregator::new()
            .with_extension(config.extension.clone())
            .with_loader(loader);

        Self {
            config,
            pipeline,
            aggregator,
            exporter: SpreadsheetExporter::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Split a raw capture into numbered segment tables in `directory`.
    pub fn split(
        &self,
        input: impl AsRef<Path>,
        directory: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>> {
        let raw = RawInput::read(input)?;
        self.write_segments(&raw, directory.as_ref())
    }

    /// Enrich every segment table in `directory`.
    pub fn enrich(&self, directory: impl AsRef<Path>) -> Result<EnrichmentReport> {
        self.pipeline
            .enrich_directory(directory, &self.config.extension)
    }

    /// Collect the derived columns of every enriched table in `directory`.
    pub fn aggregate(&self, directory: impl AsRef<Path>) -> Result<AggregateCollection> {
        self.aggregator.collect(directory)
    }

    /// Write a collection to a workbook.
    pub fn export(&self, collection: &AggregateCollection, output: impl AsRef<Path>) -> Result<()> {
        self.exporter.export(collection, output)
    }

    /// Split, enrich, aggregate and export in one pass.
    pub fn run(
        &self,
        input: impl AsRef<Path>,
        directory: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<RunSummary> {
        let input = input.as_ref();
        let directory = directory.as_ref();
        let output = output.as_ref();

        let raw = RawInput::read(input)?;
        let segments = self.write_segments(&raw, directory)?;
        let enrichment = self.pipeline.enrich_files(&segments);
        let collection = self.aggregate(directory)?;
        self.export(&collection, output)?;

        Ok(RunSummary {
            input: input.to_path_buf(),
            input_hash: raw.hash,
            input_bytes: raw.size_bytes,
            input_lines: raw.lines.len(),
            segments,
            enrichment,
            sheets: collection.names().map(|s| s.to_string()).collect(),
            output: output.to_path_buf(),
            completed_at: Utc::now(),
        })
    }

    fn write_segments(&self, raw: &RawInput, directory: &Path) -> Result<Vec<PathBuf>> {
        let segments = raw.segments(self.config.portion_size);
        info!(
            "Split {} lines from {} into {} segments",
            raw.lines.len(),
            raw.path.display(),
            segments.len()
        );
        SegmentWriter::new(directory)
            .with_prefix(self.config.file_prefix.clone())
            .with_extension(self.config.extension.clone())
            .write(&segments)
    }
}

impl Default for Cvkit {
    fn default() -> Self {
        Self::new()
    }
}
