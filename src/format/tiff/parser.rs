//! TIFF header parsing for EXIF payloads.
//!
//! An APP1/EXIF segment carries a complete little TIFF file after its
//! `Exif\0\0` signature. All offsets inside that TIFF structure are relative
//! to the first byte of its header, which we call the base.
//!
//! # TIFF Header Structure (8 bytes)
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Magic (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD, relative to byte 0
//! ```

use serde::Serialize;

use crate::error::{Corruption, ExifError};
use crate::io::{checked_slice, read_u16_be, read_u16_le, read_u32_be, read_u32_le};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_INTEL: [u8; 2] = *b"II";

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_MOTOROLA: [u8; 2] = *b"MM";

/// Magic number following the byte order mark
const TIFF_MAGIC: u16 = 0x002A;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Denominators below this are treated as zero when decoding rationals.
const RATIONAL_EPSILON: f64 = 1e-20;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) declared by the TIFF header.
///
/// Fixed once per parse and applied to every multi-byte value in the IFD tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ByteOrder {
    /// Little-endian ("II")
    Intel,
    /// Big-endian ("MM")
    Motorola,
}

impl ByteOrder {
    /// Read a u16 at `offset` using this byte order.
    #[inline]
    pub fn read_u16(self, buf: &[u8], offset: usize) -> Result<u16, Corruption> {
        let bytes = checked_slice(buf, offset, 2)?;
        Ok(match self {
            ByteOrder::Intel => read_u16_le(bytes),
            ByteOrder::Motorola => read_u16_be(bytes),
        })
    }

    /// Read a u32 at `offset` using this byte order.
    #[inline]
    pub fn read_u32(self, buf: &[u8], offset: usize) -> Result<u32, Corruption> {
        let bytes = checked_slice(buf, offset, 4)?;
        Ok(match self {
            ByteOrder::Intel => read_u32_le(bytes),
            ByteOrder::Motorola => read_u32_be(bytes),
        })
    }

    /// Read an unsigned rational (numerator u32, denominator u32) at `offset`.
    ///
    /// A zero denominator yields 0.0 rather than infinity or NaN.
    pub fn read_rational(self, buf: &[u8], offset: usize) -> Result<f64, Corruption> {
        checked_slice(buf, offset, 8)?;
        let numerator = self.read_u32(buf, offset)? as f64;
        let denominator = self.read_u32(buf, offset + 4)? as f64;
        if denominator < RATIONAL_EPSILON {
            return Ok(0.0);
        }
        Ok(numerator / denominator)
    }

    /// Decode a u16 from the 4-byte value field of a directory entry.
    #[inline]
    pub fn inline_u16(self, value_bytes: [u8; 4]) -> u16 {
        match self {
            ByteOrder::Intel => read_u16_le(&value_bytes),
            ByteOrder::Motorola => read_u16_be(&value_bytes),
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header of an EXIF payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the IFD tree
    pub byte_order: ByteOrder,

    /// Position of the header within the payload; IFD offsets are relative to it
    pub base: usize,

    /// Absolute position of IFD0 within the payload
    pub first_ifd_offset: usize,
}

impl TiffHeader {
    /// Parse the TIFF header that starts at `base` within `buf`.
    ///
    /// # Errors
    /// - `Corrupt(OutOfBounds)` if fewer than 8 bytes remain at `base`
    /// - `UnknownByteAlignment` if the byte order mark is not II or MM
    /// - `Corrupt(InvalidTiffMagic)` if the magic number is not 42
    /// - `Corrupt(InvalidIfdOffset)` if IFD0 would start outside `buf`
    pub fn parse(buf: &[u8], base: usize) -> Result<Self, ExifError> {
        let header = checked_slice(buf, base, TIFF_HEADER_SIZE)?;

        let byte_order = match [header[0], header[1]] {
            BYTE_ORDER_INTEL => ByteOrder::Intel,
            BYTE_ORDER_MOTOROLA => ByteOrder::Motorola,
            other => return Err(ExifError::UnknownByteAlignment(u16::from_be_bytes(other))),
        };

        let magic = byte_order.read_u16(header, 2)?;
        if magic != TIFF_MAGIC {
            return Err(Corruption::InvalidTiffMagic(magic).into());
        }

        let relative = byte_order.read_u32(header, 4)? as usize;
        let first_ifd_offset = base
            .checked_add(relative)
            .filter(|&offset| offset < buf.len())
            .ok_or(Corruption::InvalidIfdOffset(relative))?;

        Ok(TiffHeader {
            byte_order,
            base,
            first_ifd_offset,
        })
    }

    /// Resolve an offset stored in an IFD entry to a position in the payload.
    ///
    /// Returns `None` on arithmetic overflow; callers bounds-check the result.
    #[inline]
    pub fn resolve(&self, relative: u32) -> Option<usize> {
        self.base.checked_add(relative as usize)
    }
}

// =============================================================================
// Tests
// =============================================================================
