//! Loading and saving delimited experiment tables.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::table::ExperimentTable;
use super::value::Cell;
use crate::error::{CvkitError, Result};

/// Header names produced by tools that persist a row index as a column.
static INDEX_ARTIFACT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(Unnamed|\s*$)").unwrap());

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

/// Reads and writes experiment tables as delimited text.
#[derive(Debug, Clone, Default)]
pub struct TableLoader {
    config: LoaderConfig,
}

impl TableLoader {
    /// Create a loader for comma-separated files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a table, dropping index artifact columns.
    ///
    /// Fails with [`CvkitError::NotFound`] for a missing file, [`CvkitError::EmptyInput`]
    /// for a file without a header and [`CvkitError::MalformedInput`] when the rows do not
    /// fit the header.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<ExperimentTable> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| CvkitError::io(path, e))?;
        if contents.is_empty() {
            return Err(CvkitError::EmptyInput(format!(
                "'{}' is empty",
                path.display()
            )));
        }
        self.parse_bytes(&contents).map_err(|e| match e {
            CvkitError::EmptyInput(msg) => {
                CvkitError::EmptyInput(format!("'{}': {}", path.display(), msg))
            }
            CvkitError::MalformedInput(msg) => {
                CvkitError::MalformedInput(format!("'{}': {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse bytes directly.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ExperimentTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let raw_headers: Vec<String> = reader
            .headers()
            .map_err(classify_csv_error)?
            .iter()
            .map(|s| s.to_string())
            .collect();

        if raw_headers.is_empty() || raw_headers.iter().all(|h| h.trim().is_empty()) {
            return Err(CvkitError::EmptyInput(
                "No columns to parse from file".to_string(),
            ));
        }

        let headers = deduplicate(&raw_headers);
        let keep: Vec<bool> = headers
            .iter()
            .map(|h| !INDEX_ARTIFACT.is_match(h))
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(classify_csv_error)?;
            if record.len() > headers.len() {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                return Err(CvkitError::MalformedInput(format!(
                    "Expected {} fields in line {}, saw {}",
                    headers.len(),
                    line,
                    record.len()
                )));
            }
            let row: Vec<Cell> = record
                .iter()
                .zip(&keep)
                .filter(|(_, keep)| **keep)
                .map(|(field, _)| Cell::from_field(field))
                .collect();
            rows.push(row);
        }

        let kept_headers: Vec<String> = headers
            .into_iter()
            .zip(&keep)
            .filter(|(_, keep)| **keep)
            .map(|(h, _)| h)
            .collect();

        ExperimentTable::from_rows(kept_headers, rows)
    }

    /// Write a table to `path`, replacing any existing file.
    pub fn save(&self, table: &ExperimentTable, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| CvkitError::io(path, e))?;
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .from_writer(BufWriter::new(file));

        writer.write_record(table.column_names())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|c| c.to_field()))?;
        }
        writer.flush().map_err(|e| CvkitError::io(path, e))?;
        Ok(())
    }
}

/// Rename repeated header names to `name.1`, `name.2`, ...
fn deduplicate(headers: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(headers.len());
    for header in headers {
        let mut candidate = header.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", header, n);
            n += 1;
        }
        seen.push(candidate);
    }
    seen
}

fn classify_csv_error(err: csv::Error) -> CvkitError {
    match err.kind() {
        csv::ErrorKind::Io(_) => CvkitError::Unknown(err.to_string()),
        csv::ErrorKind::Utf8 { .. } | csv::ErrorKind::UnequalLengths { .. } => {
            CvkitError::MalformedInput(err.to_string())
        }
        _ => CvkitError::Csv(err),
    }
}
