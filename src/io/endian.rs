//! Bounds-checked byte access.
//!
//! Every multi-byte read in the parser goes through [`checked_slice`] first,
//! so a hostile offset or length surfaces as [`Corruption::OutOfBounds`]
//! instead of a panic.

use crate::error::Corruption;

/// Borrow `len` bytes starting at `offset`, or fail if the range leaves `buf`.
#[inline]
pub fn checked_slice(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], Corruption> {
    let end = offset.checked_add(len).ok_or(Corruption::OutOfBounds {
        offset,
        requested: len,
        size: buf.len(),
    })?;

    buf.get(offset..end).ok_or(Corruption::OutOfBounds {
        offset,
        requested: len,
        size: buf.len(),
    })
}

/// Read a little-endian u16 from the first two bytes of a slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from the first two bytes of a slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from the first four bytes of a slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from the first four bytes of a slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read the big-endian u16 length field that follows a JPEG marker.
///
/// JPEG segment lengths are always big-endian, whatever byte order the
/// embedded TIFF header declares.
#[inline]
pub fn read_segment_length(buf: &[u8], offset: usize) -> Result<u16, Corruption> {
    checked_slice(buf, offset, 2).map(read_u16_be)
}
