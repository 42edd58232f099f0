//! TIFF field type and EXIF tag definitions.
//!
//! Field types determine how an entry's value is encoded. Tag IDs are
//! scoped to the directory they appear in: IFD0, the EXIF sub-IFD, or the
//! GPS sub-IFD each have their own numbering, so each gets its own enum.

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types understood by the directory walker.
///
/// Other types (SBYTE, UNDEFINED, SRATIONAL, FLOAT, ...) are left undecoded
/// and the entries carrying them are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer
    Byte = 1,

    /// NUL-terminated 8-bit ASCII string
    Ascii = 2,

    /// Unsigned 16-bit integer
    Short = 3,

    /// Unsigned 32-bit integer
    Long = 4,

    /// Two unsigned 32-bit integers: numerator then denominator
    Rational = 5,
}

impl FieldType {
    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte => 1,
            FieldType::Ascii => 1,
            FieldType::Short => 2,
            FieldType::Long => 4,
            FieldType::Rational => 8,
        }
    }

    /// Create a FieldType from its numeric code.
    ///
    /// Returns `None` for codes the walker does not decode.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            _ => None,
        }
    }
}

// =============================================================================
// IFD0 Tags
// =============================================================================

/// Tags read from the primary image directory (IFD0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Ifd0Tag {
    BitsPerSample = 0x0102,
    ImageDescription = 0x010E,
    Make = 0x010F,
    Model = 0x0110,
    Orientation = 0x0112,
    Software = 0x0131,
    DateTime = 0x0132,
    Copyright = 0x8298,

    /// Offset of the EXIF sub-IFD, relative to the TIFF header
    ExifIfdPointer = 0x8769,

    /// Offset of the GPS sub-IFD, relative to the TIFF header
    GpsIfdPointer = 0x8825,
}

impl Ifd0Tag {
    /// Unknown tags are not an error; they are skipped.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0102 => Some(Ifd0Tag::BitsPerSample),
            0x010E => Some(Ifd0Tag::ImageDescription),
            0x010F => Some(Ifd0Tag::Make),
            0x0110 => Some(Ifd0Tag::Model),
            0x0112 => Some(Ifd0Tag::Orientation),
            0x0131 => Some(Ifd0Tag::Software),
            0x0132 => Some(Ifd0Tag::DateTime),
            0x8298 => Some(Ifd0Tag::Copyright),
            0x8769 => Some(Ifd0Tag::ExifIfdPointer),
            0x8825 => Some(Ifd0Tag::GpsIfdPointer),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// EXIF Sub-IFD Tags
// =============================================================================

/// Tags read from the EXIF sub-IFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExifTag {
    ExposureTime = 0x829A,
    FNumber = 0x829D,
    IsoSpeedRatings = 0x8827,
    DateTimeOriginal = 0x9003,
    DateTimeDigitized = 0x9004,
    ShutterSpeedValue = 0x9201,
    ExposureBiasValue = 0x9204,
    SubjectDistance = 0x9206,
    MeteringMode = 0x9207,
    Flash = 0x9209,
    FocalLength = 0x920A,
    SubSecTimeOriginal = 0x9291,

    /// Image width as recorded by the camera
    PixelXDimension = 0xA002,

    /// Image height as recorded by the camera
    PixelYDimension = 0xA003,

    FocalLengthIn35mmFilm = 0xA405,
}

impl ExifTag {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x829A => Some(ExifTag::ExposureTime),
            0x829D => Some(ExifTag::FNumber),
            0x8827 => Some(ExifTag::IsoSpeedRatings),
            0x9003 => Some(ExifTag::DateTimeOriginal),
            0x9004 => Some(ExifTag::DateTimeDigitized),
            0x9201 => Some(ExifTag::ShutterSpeedValue),
            0x9204 => Some(ExifTag::ExposureBiasValue),
            0x9206 => Some(ExifTag::SubjectDistance),
            0x9207 => Some(ExifTag::MeteringMode),
            0x9209 => Some(ExifTag::Flash),
            0x920A => Some(ExifTag::FocalLength),
            0x9291 => Some(ExifTag::SubSecTimeOriginal),
            0xA002 => Some(ExifTag::PixelXDimension),
            0xA003 => Some(ExifTag::PixelYDimension),
            0xA405 => Some(ExifTag::FocalLengthIn35mmFilm),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// GPS Sub-IFD Tags
// =============================================================================

/// Tags read from the GPS sub-IFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum GpsTag {
    /// 'N' or 'S'
    LatitudeRef = 1,

    /// Degrees, minutes, seconds as three rationals
    Latitude = 2,

    /// 'E' or 'W'
    LongitudeRef = 3,

    /// Degrees, minutes, seconds as three rationals
    Longitude = 4,

    /// 0 = above sea level, 1 = below sea level
    AltitudeRef = 5,

    /// Meters, as a rational
    Altitude = 6,
}

impl GpsTag {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(GpsTag::LatitudeRef),
            2 => Some(GpsTag::Latitude),
            3 => Some(GpsTag::LongitudeRef),
            4 => Some(GpsTag::Longitude),
            5 => Some(GpsTag::AltitudeRef),
            6 => Some(GpsTag::Altitude),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Tests
// =============================================================================
