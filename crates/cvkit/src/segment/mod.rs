//! Splitting a raw reading stream into per-experiment tables.

mod segmenter;
mod writer;

pub use segmenter::{RawInput, split_segments};
pub use writer::{SEGMENT_HEADERS, SegmentWriter};
