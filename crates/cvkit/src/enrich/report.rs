//! Outcomes of enriching tables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CvkitError, ErrorKind};

use super::stages::Stage;

/// What happened to one stage of one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageStatus {
    /// The stage ran and the table was saved.
    Applied,
    /// The stage was rejected; the file keeps its previous state.
    Skipped { kind: ErrorKind, reason: String },
}

/// Result of a single stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOutcome {
    pub stage: Stage,
    #[serde(flatten)]
    pub status: StageStatus,
}

impl StageOutcome {
    pub fn applied(stage: Stage) -> Self {
        Self {
            stage,
            status: StageStatus::Applied,
        }
    }

    pub fn skipped(stage: Stage, error: &CvkitError) -> Self {
        Self {
            stage,
            status: StageStatus::Skipped {
                kind: error.kind(),
                reason: error.to_string(),
            },
        }
    }

    pub fn is_applied(&self) -> bool {
        self.status == StageStatus::Applied
    }
}

/// Everything that happened to one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// Outcomes of the stages that were attempted, in order.
    pub stages: Vec<StageOutcome>,
    /// Set when loading or saving failed and the remaining stages were abandoned.
    pub aborted: Option<String>,
    /// Rows in the table after the last successful stage.
    pub row_count: usize,
}

impl FileReport {
    pub fn new(path: &Path) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file,
            path: path.to_path_buf(),
            stages: Vec::new(),
            aborted: None,
            row_count: 0,
        }
    }

    /// True when every stage ran.
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
            && self.stages.len() == Stage::ALL.len()
            && self.stages.iter().all(StageOutcome::is_applied)
    }

    pub fn outcome(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages.iter().find(|o| o.stage == stage)
    }
}

/// Reports for a batch of files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentReport {
    pub files: Vec<FileReport>,
}

impl EnrichmentReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, report: FileReport) {
        self.files.push(report);
    }

    /// Files on which every stage ran.
    pub fn complete_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_complete()).count()
    }

    /// Stages that were skipped, across all files.
    pub fn skipped_count(&self) -> usize {
        self.files
            .iter()
            .flat_map(|f| &f.stages)
            .filter(|o| !o.is_applied())
            .count()
    }

    /// Files abandoned after a load or save failure.
    pub fn aborted_count(&self) -> usize {
        self.files.iter().filter(|f| f.aborted.is_some()).count()
    }
}
