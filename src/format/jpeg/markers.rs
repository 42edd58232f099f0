//! JPEG marker registry.
//!
//! A marker is the byte pair `0xFF, code`. Only the codes listed in
//! [`MARKER_TABLE`] are reported by the scanner. Unlisted codes that still
//! carry a length field (APP2 ICC profiles, APP14 Adobe) are skipped whole,
//! and everything else (fill bytes, stuffed `0xFF 0x00`, restart markers) is
//! stepped over.

// =============================================================================
// JPEG Markers
// =============================================================================

/// Prefix byte of every marker
pub const MARKER_MAGIC: u8 = 0xFF;

/// Start Of Image marker
pub const SOI: [u8; 2] = [MARKER_MAGIC, 0xD8];

/// End Of Image marker
pub const EOI: [u8; 2] = [MARKER_MAGIC, 0xD9];

/// Application segment 1 (EXIF, and sometimes XMP) marker
pub const APP1: [u8; 2] = [MARKER_MAGIC, 0xE1];

/// Signature opening the payload of an EXIF APP1 segment
pub const EXIF_SIGNATURE: &[u8; 6] = b"Exif\0\0";

// =============================================================================
// Marker Table
// =============================================================================

/// Static description of a recognized marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerDescriptor {
    /// Marker code (the byte after 0xFF)
    pub marker: u8,

    /// Short mnemonic
    pub name: &'static str,

    /// Whether a big-endian u16 length field follows the marker.
    ///
    /// SOI and EOI stand alone; every other recognized marker carries a
    /// length that counts itself plus the payload.
    pub has_length: bool,
}

const fn marker(marker: u8, name: &'static str, has_length: bool) -> MarkerDescriptor {
    MarkerDescriptor {
        marker,
        name,
        has_length,
    }
}

/// Every recognized marker, sorted by code.
pub static MARKER_TABLE: [MarkerDescriptor; 23] = [
    marker(0xC0, "SOF0", true),
    marker(0xC1, "SOF1", true),
    marker(0xC2, "SOF2", true),
    marker(0xC3, "SOF3", true),
    marker(0xC4, "DHT", true),
    marker(0xC5, "SOF5", true),
    marker(0xC6, "SOF6", true),
    marker(0xC7, "SOF7", true),
    marker(0xC9, "SOF9", true),
    marker(0xCA, "SOF10", true),
    marker(0xCB, "SOF11", true),
    marker(0xCD, "SOF13", true),
    marker(0xCE, "SOF14", true),
    marker(0xCF, "SOF15", true),
    marker(0xD8, "SOI", false),
    marker(0xD9, "EOI", false),
    marker(0xDA, "SOS", true),
    marker(0xDB, "DQT", true),
    marker(0xDD, "DRI", true),
    marker(0xE0, "JFIF", true),
    marker(0xE1, "EXIF", true),
    marker(0xED, "IPTC", true),
    marker(0xFE, "COM", true),
];

/// Look up a marker code in the table.
pub fn lookup(code: u8) -> Option<&'static MarkerDescriptor> {
    MARKER_TABLE
        .binary_search_by_key(&code, |d| d.marker)
        .ok()
        .map(|index| &MARKER_TABLE[index])
}

/// Check if a marker code is followed by a big-endian length field.
///
/// True for `0xC0..=0xFE` apart from the restart markers, SOI and EOI,
/// whether or not the code is in [`MARKER_TABLE`].
#[inline]
pub const fn has_length_field(code: u8) -> bool {
    matches!(code, 0xC0..=0xFE) && !matches!(code, 0xD0..=0xD9)
}

/// Check if the two bytes at `pos` form a recognized marker.
#[inline]
pub fn marker_at(buf: &[u8], pos: usize) -> Option<&'static MarkerDescriptor> {
    match buf.get(pos..pos + 2) {
        Some([MARKER_MAGIC, code]) => lookup(*code),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
