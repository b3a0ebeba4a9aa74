//! Error types for the cvkit library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cvkit operations.
#[derive(Debug, Error)]
pub enum CvkitError {
    /// A file or directory that should exist does not.
    #[error("Not found: '{}'", path.display())]
    NotFound { path: PathBuf },

    /// Zero-byte file or a table without a header row.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Tabular structure that cannot be parsed.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A column an enrichment stage depends on is absent.
    #[error("The required column '{column}' does not exist (stage: {stage})")]
    MissingColumn { stage: String, column: String },

    /// Error reading or writing a file.
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error writing the aggregate workbook.
    #[error("Spreadsheet export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything else.
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

/// Coarse classification of a [`CvkitError`], used when reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    EmptyInput,
    MalformedInput,
    MissingColumn,
    Unknown,
}

impl CvkitError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CvkitError::NotFound { .. } => ErrorKind::NotFound,
            CvkitError::EmptyInput(_) => ErrorKind::EmptyInput,
            CvkitError::MalformedInput(_) => ErrorKind::MalformedInput,
            CvkitError::MissingColumn { .. } => ErrorKind::MissingColumn,
            CvkitError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorKind::NotFound
            }
            CvkitError::Csv(e) => match e.kind() {
                csv::ErrorKind::UnequalLengths { .. } | csv::ErrorKind::Utf8 { .. } => {
                    ErrorKind::MalformedInput
                }
                _ => ErrorKind::Unknown,
            },
            _ => ErrorKind::Unknown,
        }
    }

    /// Wrap an IO error with the path it happened on.
    ///
    /// A missing file becomes [`CvkitError::NotFound`].
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            CvkitError::NotFound { path }
        } else {
            CvkitError::Io { path, source }
        }
    }
}

/// Result type alias for cvkit operations.
pub type Result<T> = std::result::Result<T, CvkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let err = CvkitError::io(
            "missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, CvkitError::NotFound { .. }));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_missing_column_message() {
        let err = CvkitError::MissingColumn {
            stage: "current_density".to_string(),
            column: "Area (cm^2)".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::MissingColumn);
        assert!(err.to_string().contains("'Area (cm^2)'"));
    }

    #[test]
    fn test_other_io_is_unknown() {
        let err = CvkitError::io(
            "locked.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }
}
