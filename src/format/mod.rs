//! Parsers for the byte formats involved in EXIF extraction.
//!
//! - [`jpeg`]: marker table, marker scanner and APP1/EXIF segment locator
//! - [`tiff`]: byte order, TIFF header and IFD walking inside the segment

pub mod jpeg;
pub mod tiff;

pub use jpeg::{locate_exif_segment, scan_markers, ExifSegment, MarkerScan, ScanMode, SegmentInfo};
pub use tiff::{walk_ifd, ByteOrder, EntryValue, Ifd, IfdEntry, TiffHeader};
