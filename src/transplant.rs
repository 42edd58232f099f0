//! EXIF transplant between JPEG files.
//!
//! The source's APP1/EXIF segment is copied byte for byte into the
//! destination, directly after its SOI marker. Nothing is re-encoded: the
//! destination keeps its own tables and scan data. If the destination already
//! carries an EXIF segment it is dropped, so the result holds exactly one.
//!
//! # Output Layout
//! ```text
//! FF D8                       SOI
//! <source APP1/EXIF segment>  verbatim
//! <destination after SOI>     minus its own EXIF segment, if any
//! ```

use std::path::Path;

use bytes::{Bytes, BytesMut};
use tracing::{debug, warn};

use crate::error::ExifError;
use crate::format::jpeg::{
    locate_exif_segment, scan_markers, validate_framing, ScanMode, EXIF_SIGNATURE, SOI,
};
use crate::io::{read_bounded, write_atomic, DEFAULT_MAX_FILE_SIZE};

/// Build a copy of `dest` carrying the EXIF segment of `source`.
///
/// # Errors
/// - `NoJpeg`/`NoExif`/`Corrupt` if the source segment cannot be located
/// - `NoExif` if the source's first APP1 segment is not EXIF (XMP, say)
/// - `NoJpeg` if `dest` is shorter than 4 bytes or lacks SOI
pub fn graft_exif(source: &[u8], dest: &[u8]) -> Result<Bytes, ExifError> {
    let segment = locate_exif_segment(source)?;
    if !source[segment.payload_range()].starts_with(EXIF_SIGNATURE) {
        debug!(start = segment.start, "first APP1 segment of source is not EXIF");
        return Err(ExifError::NoExif);
    }
    validate_framing(dest, ScanMode::Relaxed)?;

    // A destination whose markers cannot be walked is kept whole.
    let existing = match scan_markers(dest, ScanMode::Relaxed) {
        Ok(scan) => scan.exif,
        Err(e) => {
            debug!(error = %e, "could not scan destination markers, keeping it intact");
            None
        }
    };

    let exif = &source[segment.range()];
    let replaced = existing.is_some();
    let (before, after) = match existing {
        Some(range) => (&dest[SOI.len()..range.start], &dest[range.end..]),
        None => (&dest[SOI.len()..], &dest[dest.len()..]),
    };

    let mut result = BytesMut::with_capacity(SOI.len() + exif.len() + before.len() + after.len());
    result.extend_from_slice(&SOI);
    result.extend_from_slice(exif);
    result.extend_from_slice(before);
    result.extend_from_slice(after);

    debug!(
        exif_len = exif.len(),
        replaced,
        output_len = result.len(),
        "grafted EXIF segment"
    );
    Ok(result.freeze())
}

/// Copy the EXIF segment of `source` into `dest`, rewriting `dest` in place.
///
/// Both files are read whole (each must be under 20 MB). Nothing is written
/// unless the new contents could be built.
pub fn try_copy_exif(source: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<(), ExifError> {
    try_copy_exif_with_limit(source, dest, DEFAULT_MAX_FILE_SIZE)
}

/// Like [`try_copy_exif`], with a caller-chosen size ceiling.
pub fn try_copy_exif_with_limit(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    limit: u64,
) -> Result<(), ExifError> {
    let (source, dest) = (source.as_ref(), dest.as_ref());

    let source_buf = read_bounded(source, limit)?;
    let dest_buf = read_bounded(dest, limit)?;
    let output = graft_exif(&source_buf, &dest_buf)?;

    write_atomic(dest, &output)?;
    Ok(())
}

/// Copy the EXIF segment of `source` into `dest`, returning whether it worked.
///
/// Failures are logged at warn level; see [`try_copy_exif`] for the error.
pub fn copy_exif(source: impl AsRef<Path>, dest: impl AsRef<Path>) -> bool {
    let (source, dest) = (source.as_ref(), dest.as_ref());
    match try_copy_exif(source, dest) {
        Ok(()) => true,
        Err(e) => {
            warn!(
                source = %source.display(),
                dest = %dest.display(),
                error = %e,
                "EXIF copy failed"
            );
            false
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
