//! Writing segments as numbered `Potential,Current` tables.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::columns::{CURRENT, POTENTIAL};
use crate::error::{CvkitError, Result};
use crate::input::Cell;

/// Header written to every segment file.
pub const SEGMENT_HEADERS: [&str; 2] = [POTENTIAL, CURRENT];

/// Writes segments into a directory as `<prefix>_<n>.<extension>`.
#[derive(Debug, Clone)]
pub struct SegmentWriter {
    directory: PathBuf,
    file_prefix: String,
    extension: String,
}

impl SegmentWriter {
    /// Create a writer for `directory` using the default `output_part_<n>.csv` naming.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            file_prefix: "output_part".to_string(),
            extension: "csv".to_string(),
        }
    }

    /// Use a different file name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Use a different file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Path of the table for the 1-based segment `index`.
    pub fn segment_path(&self, index: usize) -> PathBuf {
        self.directory
            .join(format!("{}_{}.{}", self.file_prefix, index, self.extension))
    }

    /// Write every segment to its own file and return the paths in order.
    ///
    /// The first line of each segment is a carried-over header and is skipped. Stops at the
    /// first error; files written before it are left in place.
    pub fn write<L: AsRef<str>>(&self, segments: &[&[L]]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.directory).map_err(|e| CvkitError::Io {
            path: self.directory.clone(),
            source: e,
        })?;

        let mut written = Vec::with_capacity(segments.len());
        for (idx, segment) in segments.iter().enumerate() {
            let path = self.segment_path(idx + 1);
            self.write_segment(&path, segment)?;
            debug!(
                "Wrote {} rows to {}",
                segment.len().saturating_sub(1),
                path.display()
            );
            written.push(path);
        }

        info!(
            "Data successfully written to {} files in {}",
            written.len(),
            self.directory.display()
        );
        Ok(written)
    }

    fn write_segment<L: AsRef<str>>(&self, path: &Path, segment: &[L]) -> Result<()> {
        let file = File::create(path).map_err(|e| CvkitError::io(path, e))?;
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(BufWriter::new(file));

        writer.write_record(SEGMENT_HEADERS)?;
        for line in segment.iter().skip(1) {
            let fields = line
                .as_ref()
                .trim()
                .split(',')
                .map(|token| Cell::coerce(token).to_field());
            writer.write_record(fields)?;
        }
        writer.flush().map_err(|e| CvkitError::io(path, e))?;
        Ok(())
    }
}
