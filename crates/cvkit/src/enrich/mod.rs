//! Enrichment of experiment tables with metadata and derived columns.

mod metadata;
mod pipeline;
mod report;
mod stages;

pub use metadata::ExperimentMetadata;
pub use pipeline::EnrichmentPipeline;
pub use report::{EnrichmentReport, FileReport, StageOutcome, StageStatus};
pub use stages::{Stage, add_current_density, add_reference_potential, forward_fill, merge_metadata};
