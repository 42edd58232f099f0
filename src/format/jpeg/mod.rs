//! JPEG container handling.
//!
//! JPEG files are a sequence of marker segments. EXIF metadata lives in an
//! APP1 segment whose payload starts with `Exif\0\0` and holds a TIFF
//! structure. This module finds that segment; [`crate::format::tiff`]
//! decodes what is inside it.
//!
//! Two entry points exist:
//!
//! - [`scan_markers`] walks every segment and validates SOI/EOI framing
//! - [`locate_exif_segment`] only needs SOI and stops at the first APP1

mod markers;
mod scanner;
mod segment;

pub use markers::{
    has_length_field, lookup, marker_at, MarkerDescriptor, APP1, EOI, EXIF_SIGNATURE,
    MARKER_MAGIC, MARKER_TABLE, SOI,
};
pub use scanner::{scan_markers, validate_framing, MarkerScan, ScanMode, SegmentInfo};
pub use segment::{locate_exif_segment, ExifSegment, MIN_EXIF_SEGMENT_LENGTH};
