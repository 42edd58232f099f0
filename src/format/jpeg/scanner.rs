//! JPEG marker scanning.
//!
//! Walks a whole JPEG buffer and records every recognized marker segment.
//!
//! # Scanning Rules
//!
//! 1. The buffer must be at least 4 bytes and start with SOI (FFD8)
//! 2. In [`ScanMode::Strict`] it must also end with EOI (FFD9)
//! 3. Bytes are examined one at a time for `0xFF` followed by a marker code
//! 4. SOI/EOI occupy 2 bytes; other markers occupy their big-endian length
//!    field plus 2, and their payload is skipped so that byte patterns inside
//!    it (an embedded thumbnail, an ICC profile) are not mistaken for markers
//! 5. Only markers in the marker table are recorded; unlisted length-bearing
//!    segments such as APP2 are skipped without an entry
//! 6. After an SOS header, entropy-coded data is scanned byte by byte

use std::ops::Range;

use serde::Serialize;
use tracing::debug;

use crate::error::{Corruption, ExifError};
use crate::io::read_segment_length;

use super::markers::{
    has_length_field, marker_at, APP1, EOI, EXIF_SIGNATURE, MARKER_MAGIC, SOI,
};

const APP1_CODE: u8 = APP1[1];

/// How strictly the buffer boundaries are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Require both SOI at the start and EOI at the end
    #[default]
    Strict,

    /// Require only SOI; used when a file merely needs its EXIF located
    Relaxed,
}

/// One marker segment found by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentInfo {
    /// Prefix byte (always 0xFF)
    pub signature: u8,

    /// Marker code
    pub marker: u8,

    /// Marker mnemonic from the marker table
    pub name: &'static str,

    /// Byte offset of the 0xFF prefix
    pub offset: usize,

    /// Total size including the 2 marker bytes
    pub size: usize,
}

impl SegmentInfo {
    /// Byte range covered by this segment.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.size
    }
}

/// Result of scanning one buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerScan {
    /// Segments in file order
    pub segments: Vec<SegmentInfo>,

    /// Byte range of the first APP1 segment carrying the Exif signature
    pub exif: Option<Range<usize>>,
}

/// Check the SOI (and in strict mode, EOI) framing of a JPEG buffer.
pub fn validate_framing(buf: &[u8], mode: ScanMode) -> Result<(), ExifError> {
    if buf.len() < 4 || buf[..2] != SOI {
        return Err(ExifError::NoJpeg);
    }
    if mode == ScanMode::Strict && buf[buf.len() - 2..] != EOI {
        return Err(ExifError::NoJpeg);
    }
    Ok(())
}

/// Scan `buf` for marker segments.
///
/// # Errors
/// - `NoJpeg` if the SOI/EOI framing required by `mode` is missing
/// - `Corrupt` if a segment's length field cannot be read or its declared
///   size runs past the end of the buffer
pub fn scan_markers(buf: &[u8], mode: ScanMode) -> Result<MarkerScan, ExifError> {
    validate_framing(buf, mode)?;

    let mut scan = MarkerScan::default();
    let mut pos = 0;

    while pos + 1 < buf.len() {
        let descriptor = marker_at(buf, pos);
        let has_length = match descriptor {
            Some(descriptor) => descriptor.has_length,
            None if buf[pos] == MARKER_MAGIC && has_length_field(buf[pos + 1]) => true,
            None => {
                pos += 1;
                continue;
            }
        };

        let size = if has_length {
            read_segment_length(buf, pos + 2)? as usize + 2
        } else {
            2
        };

        if pos + size > buf.len() {
            return Err(Corruption::SegmentOverrun {
                start: pos,
                declared: size,
                size: buf.len(),
            }
            .into());
        }

        let Some(descriptor) = descriptor else {
            debug!(offset = pos, marker = buf[pos + 1], size, "skipping unlisted segment");
            pos += size.max(2);
            continue;
        };

        let segment = SegmentInfo {
            signature: buf[pos],
            marker: descriptor.marker,
            name: descriptor.name,
            offset: pos,
            size,
        };

        if scan.exif.is_none() && segment.marker == APP1_CODE && is_exif_payload(buf, &segment) {
            scan.exif = Some(segment.range());
        }

        scan.segments.push(segment);

        // A zero or one length field would leave us in place; always advance.
        pos += size.max(2);
    }

    Ok(scan)
}

/// Check whether an APP1 segment's payload begins with `Exif\0\0`.
fn is_exif_payload(buf: &[u8], segment: &SegmentInfo) -> bool {
    let payload = segment.offset + 4;
    segment.size >= 4 + EXIF_SIGNATURE.len()
        && buf.get(payload..payload + EXIF_SIGNATURE.len()) == Some(&EXIF_SIGNATURE[..])
}

// =============================================================================
// Tests
// =============================================================================
