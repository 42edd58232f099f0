//! TIFF structures embedded in EXIF segments.
//!
//! # Key Concepts
//!
//! - **Byte order**: the TIFF header declares its endianness (II = little-endian,
//!   MM = big-endian). Every multi-byte value in the IFD tree follows it.
//!
//! - **Base offset**: offsets stored in IFD entries are relative to the first
//!   byte of the TIFF header, not to the start of the JPEG file.
//!
//! - **IFD (Image File Directory)**: a counted table of 12-byte entries.
//!   IFD0 describes the primary image and points at the EXIF and GPS sub-IFDs.
//!
//! - **Inline vs offset values**: values of 4 bytes or less live in the entry
//!   itself; larger values are stored at an offset pointed to by the entry.

mod ifd;
mod parser;
mod tags;

pub use ifd::{walk_ifd, EntryValue, Ifd, IfdEntry, IFD_ENTRY_SIZE};
pub use parser::{ByteOrder, TiffHeader, TIFF_HEADER_SIZE};
pub use tags::{ExifTag, FieldType, GpsTag, Ifd0Tag};
