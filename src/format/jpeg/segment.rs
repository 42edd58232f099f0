//! EXIF segment location.
//!
//! A lighter alternative to the full marker scan: only the SOI prefix is
//! validated and the buffer is searched for the first `0xFF 0xE1` pair.
//!
//! # APP1 Layout
//! ```text
//! Bytes 0-1: FF E1
//! Bytes 2-3: Length (big-endian), counting itself and the payload
//! Bytes 4-9: "Exif\0\0"
//! Bytes 10+: TIFF header and IFDs
//! ```
//!
//! The smallest usable length is 16: the length field (2), the signature
//! (6) and a TIFF header (8).

use std::ops::Range;

use tracing::debug;

use crate::error::{Corruption, ExifError};
use crate::io::read_segment_length;

use super::markers::{APP1, SOI};

/// Minimum declared APP1 length able to hold the signature and TIFF header
pub const MIN_EXIF_SEGMENT_LENGTH: u16 = 16;

/// Marker (2) plus length field (2)
const SEGMENT_HEADER_SIZE: usize = 4;

/// Location of the EXIF segment within a JPEG buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExifSegment {
    /// Offset of the 0xFF 0xE1 marker
    pub start: usize,

    /// Total size including the marker bytes (declared length + 2)
    pub length: usize,
}

impl ExifSegment {
    /// Byte range of the whole segment, marker included.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Byte range of the payload, starting at the `Exif\0\0` signature.
    #[inline]
    pub fn payload_range(&self) -> Range<usize> {
        self.start + SEGMENT_HEADER_SIZE..self.end()
    }

    /// Offset of the first byte after the segment.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Find the first APP1 marker and validate its declared length.
///
/// # Errors
/// - `NoJpeg` if the buffer is shorter than 4 bytes or lacks SOI
/// - `NoExif` if no `0xFF 0xE1` pair exists
/// - `Corrupt` if the length field is unreadable, below 16, or claims more
///   bytes than the buffer holds (the segment plus the 2 bytes after it)
pub fn locate_exif_segment(buf: &[u8]) -> Result<ExifSegment, ExifError> {
    if buf.len() < 4 || buf[..2] != SOI {
        return Err(ExifError::NoJpeg);
    }

    let start = buf
        .windows(2)
        .position(|pair| pair == APP1)
        .ok_or(ExifError::NoExif)?;

    let declared = read_segment_length(buf, start + 2)?;

    if start + SEGMENT_HEADER_SIZE + declared as usize > buf.len() {
        return Err(Corruption::SegmentOverrun {
            start,
            declared: declared as usize,
            size: buf.len(),
        }
        .into());
    }
    if declared < MIN_EXIF_SEGMENT_LENGTH {
        return Err(Corruption::SegmentTooShort { declared }.into());
    }

    let segment = ExifSegment {
        start,
        length: declared as usize + 2,
    };
    debug!(start, length = segment.length, "located EXIF segment");
    Ok(segment)
}

// =============================================================================
// Tests
// =============================================================================
