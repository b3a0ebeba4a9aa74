//! Fixed-size partitioning of raw input lines.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{CvkitError, Result};

/// Raw measurement text read from disk.
#[derive(Debug, Clone)]
pub struct RawInput {
    /// Path the text was read from.
    pub path: PathBuf,
    /// Lines without their terminators.
    pub lines: Vec<String>,
    /// SHA-256 of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
}

impl RawInput {
    /// Read a raw capture file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| CvkitError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let text = String::from_utf8(contents).map_err(|e| {
            CvkitError::MalformedInput(format!("'{}' is not UTF-8: {}", path.display(), e))
        })?;
        let size_bytes = text.len() as u64;
        let lines = text.lines().map(|l| l.to_string()).collect();

        Ok(Self {
            path: path.to_path_buf(),
            lines,
            hash,
            size_bytes,
        })
    }

    /// Split the lines into segments of `portion_size`.
    pub fn segments(&self, portion_size: NonZeroUsize) -> Vec<&[String]> {
        split_segments(&self.lines, portion_size)
    }
}

/// Split `lines` into contiguous chunks of `portion_size`; only the last may be shorter.
///
/// Empty input yields no segments.
pub fn split_segments<T>(lines: &[T], portion_size: NonZeroUsize) -> Vec<&[T]> {
    lines.chunks(portion_size.get()).collect()
}
