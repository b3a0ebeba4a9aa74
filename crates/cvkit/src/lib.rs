//! cvkit: segmentation and enrichment pipeline for cyclic voltammetry exports.
//!
//! A potentiostat export holds many experiments back to back as `potential,current` lines.
//! cvkit splits it into one table per experiment, adds the reference-corrected potential
//! `E(RHE)` and the `Current Density`, and gathers those two columns from every experiment
//! into one workbook with a sheet per experiment.
//!
//! # Example
//!
//! ```no_run
//! use cvkit::Cvkit;
//!
//! let cvkit = Cvkit::new();
//! let summary = cvkit.run("capture.txt", "parts", "combined.xlsx").unwrap();
//!
//! println!("Segments: {}", summary.segments.len());
//! println!("Sheets: {}", summary.sheets.len());
//! ```

pub mod aggregate;
pub mod columns;
pub mod enrich;
pub mod error;
pub mod input;
pub mod segment;

mod cvkit;

pub use crate::cvkit::{Cvkit, DEFAULT_PORTION_SIZE, PipelineConfig, RunSummary};
pub use aggregate::{AggregateCollection, Aggregator, SpreadsheetExporter};
pub use enrich::{
    EnrichmentPipeline, EnrichmentReport, ExperimentMetadata, FileReport, Stage, StageOutcome,
    StageStatus,
};
pub use error::{CvkitError, ErrorKind, Result};
pub use input::{Cell, ExperimentTable, LoaderConfig, TableLoader};
pub use segment::{RawInput, SegmentWriter, split_segments};
