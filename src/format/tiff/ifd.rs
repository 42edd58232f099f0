//! Image File Directory walking.
//!
//! # IFD Structure
//! ```text
//! Bytes 0-1:  Entry count N
//! Bytes 2..:  N entries of 12 bytes each
//!               2 bytes: tag
//!               2 bytes: field type
//!               4 bytes: component count
//!               4 bytes: value (if it fits) or offset to value
//! Last 4:     Offset of the next IFD (0 if none)
//! ```
//!
//! The whole directory is bounds-checked before any entry is decoded. After
//! that, a single entry whose out-of-line value cannot be read is kept with
//! [`EntryValue::Unreadable`] instead of failing the directory.

use tracing::debug;

use crate::error::{Corruption, ExifError};
use crate::io::checked_slice;

use super::parser::TiffHeader;
use super::tags::FieldType;

/// Size of one directory entry in bytes.
pub const IFD_ENTRY_SIZE: usize = 12;

/// Entry count (2 bytes) plus next-IFD offset (4 bytes).
const IFD_FIXED_SIZE: usize = 6;

// =============================================================================
// EntryValue
// =============================================================================

/// Decoded value of a directory entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValue {
    Byte(u8),
    Ascii(String),
    Short(u16),
    Long(u32),

    /// All `count` rationals of the entry, in order
    Rational(Vec<f64>),

    /// Known field type, but its out-of-line data lies outside the payload
    Unreadable,

    /// Field type code the walker does not decode
    Unsupported,
}

// =============================================================================
// IfdEntry
// =============================================================================

/// A single decoded directory entry.
#[derive(Debug, Clone, PartialEq)]
pub struct IfdEntry {
    /// Tag ID, interpreted by the caller according to the directory
    pub tag: u16,

    /// Field type, `None` if the raw code is not decoded
    pub field_type: Option<FieldType>,

    /// Raw field type code as stored in the entry
    pub field_type_raw: u16,

    /// Number of components
    pub count: u32,

    /// Value/offset field read as a u32 in the file's byte order
    pub value_offset: u32,

    /// Value/offset field exactly as stored
    pub value_bytes: [u8; 4],

    /// Decoded value
    pub value: EntryValue,
}

impl IfdEntry {
    /// Parse the 12-byte entry at `offset`.
    fn parse(buf: &[u8], offset: usize, header: &TiffHeader) -> Result<Self, Corruption> {
        let order = header.byte_order;
        let raw = checked_slice(buf, offset, IFD_ENTRY_SIZE)?;

        let tag = order.read_u16(raw, 0)?;
        let field_type_raw = order.read_u16(raw, 2)?;
        let count = order.read_u32(raw, 4)?;
        let value_offset = order.read_u32(raw, 8)?;
        let value_bytes = [raw[8], raw[9], raw[10], raw[11]];
        let field_type = FieldType::from_u16(field_type_raw);

        let mut entry = IfdEntry {
            tag,
            field_type,
            field_type_raw,
            count,
            value_offset,
            value_bytes,
            value: EntryValue::Unsupported,
        };
        entry.value = entry.decode_value(buf, header);
        Ok(entry)
    }

    fn decode_value(&self, buf: &[u8], header: &TiffHeader) -> EntryValue {
        let Some(field_type) = self.field_type else {
            return EntryValue::Unsupported;
        };

        match field_type {
            FieldType::Byte => EntryValue::Byte(self.value_bytes[0]),
            FieldType::Short => EntryValue::Short(header.byte_order.inline_u16(self.value_bytes)),
            FieldType::Long => EntryValue::Long(self.value_offset),
            FieldType::Ascii => match self.ascii_bytes(buf, header) {
                Some(bytes) => EntryValue::Ascii(decode_ascii(bytes)),
                None => EntryValue::Unreadable,
            },
            FieldType::Rational => match self.rationals(buf, header) {
                Some(values) => EntryValue::Rational(values),
                None => EntryValue::Unreadable,
            },
        }
    }

    /// Raw string bytes: inline for up to 4 characters, otherwise out of line.
    fn ascii_bytes<'a>(&'a self, buf: &'a [u8], header: &TiffHeader) -> Option<&'a [u8]> {
        let len = self.count as usize;
        if len <= self.value_bytes.len() {
            return Some(&self.value_bytes[..len]);
        }
        let start = header.resolve(self.value_offset)?;
        checked_slice(buf, start, len).ok()
    }

    /// Read all `count` rationals from the out-of-line data area.
    fn rationals(&self, buf: &[u8], header: &TiffHeader) -> Option<Vec<f64>> {
        let start = header.resolve(self.value_offset)?;
        let total = (self.count as usize).checked_mul(FieldType::Rational.size_in_bytes())?;

        // Check the whole run up front so a huge count never allocates.
        checked_slice(buf, start, total).ok()?;

        (0..self.count as usize)
            .map(|i| header.byte_order.read_rational(buf, start + i * 8).ok())
            .collect()
    }

    /// Decoded string, if this is an ASCII entry.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            EntryValue::Ascii(s) => Some(s),
            _ => None,
        }
    }

    /// Decoded value, if this is a SHORT entry.
    pub fn as_short(&self) -> Option<u16> {
        match self.value {
            EntryValue::Short(v) => Some(v),
            _ => None,
        }
    }

    /// SHORT or LONG value widened to u32.
    pub fn as_u32(&self) -> Option<u32> {
        match self.value {
            EntryValue::Short(v) => Some(v as u32),
            EntryValue::Long(v) => Some(v),
            _ => None,
        }
    }

    /// First rational component, if this is a RATIONAL entry.
    pub fn as_rational(&self) -> Option<f64> {
        match &self.value {
            EntryValue::Rational(values) => values.first().copied(),
            _ => None,
        }
    }

    /// Exactly three rational components (degrees, minutes, seconds).
    pub fn as_rational_triple(&self) -> Option<[f64; 3]> {
        match &self.value {
            EntryValue::Rational(values) if values.len() == 3 => {
                Some([values[0], values[1], values[2]])
            }
            _ => None,
        }
    }

    /// First byte of the value field, whatever the declared type.
    ///
    /// GPS reference tags ('N'/'S', 'E'/'W', altitude 0/1) are read this way.
    #[inline]
    pub fn first_value_byte(&self) -> u8 {
        self.value_bytes[0]
    }
}

/// Strip one terminating NUL (only from strings longer than one byte), then
/// one leading NUL. Any further padding is kept.
fn decode_ascii(bytes: &[u8]) -> String {
    let mut text = bytes;
    if let [rest @ .., 0] = text {
        if !rest.is_empty() {
            text = rest;
        }
    }
    if let [0, rest @ ..] = text {
        text = rest;
    }
    String::from_utf8_lossy(text).into_owned()
}

// =============================================================================
// Ifd
// =============================================================================

/// A decoded Image File Directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Ifd {
    /// Entries in file order
    pub entries: Vec<IfdEntry>,

    /// Offset of the next IFD relative to the TIFF header (0 if none)
    pub next_ifd_offset: u32,
}

impl Ifd {
    /// Find the first entry with the given tag.
    pub fn get_entry(&self, tag: u16) -> Option<&IfdEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    /// Size in bytes of a directory with `entry_count` entries.
    #[inline]
    pub const fn calculate_size(entry_count: u16) -> usize {
        IFD_FIXED_SIZE + IFD_ENTRY_SIZE * entry_count as usize
    }
}

/// Decode the directory whose entry count sits at `offset` in `buf`.
///
/// # Errors
/// - `Corrupt(OutOfBounds)` if the entry count itself cannot be read
/// - `Corrupt(DirectoryOverrun)` if `offset + 6 + 12 * count` exceeds `buf.len()`
pub fn walk_ifd(buf: &[u8], offset: usize, header: &TiffHeader) -> Result<Ifd, ExifError> {
    let entry_count = header.byte_order.read_u16(buf, offset)?;

    let fits = offset
        .checked_add(Ifd::calculate_size(entry_count))
        .is_some_and(|end| end <= buf.len());
    if !fits {
        return Err(Corruption::DirectoryOverrun {
            offset,
            entries: entry_count,
            size: buf.len(),
        }
        .into());
    }

    let entries_start = offset + 2;
    let entries = (0..entry_count as usize)
        .map(|i| IfdEntry::parse(buf, entries_start + i * IFD_ENTRY_SIZE, header))
        .collect::<Result<Vec<_>, _>>()?;

    let next_ifd_offset = header
        .byte_order
        .read_u32(buf, entries_start + entry_count as usize * IFD_ENTRY_SIZE)?;

    debug!(offset, entries = entry_count, "walked IFD");

    Ok(Ifd {
        entries,
        next_ifd_offset,
    })
}

// =============================================================================
// Tests
// =============================================================================
