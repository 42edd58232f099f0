//! The decoded metadata record.

use serde::Serialize;

use crate::format::tiff::ByteOrder;

// =============================================================================
// Orientation
// =============================================================================

/// Image orientation as stored in IFD0 tag 0x0112.
///
/// Only the four rotations are recognized; mirrored orientations (2, 4, 5, 7)
/// and anything out of range decode to [`Orientation::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u16)]
pub enum Orientation {
    #[default]
    Unknown = 0,

    /// Row 0 at the top, column 0 at the left (no rotation)
    UpperLeft = 1,

    /// Rotated 180 degrees
    LowerRight = 3,

    /// Rotated 90 degrees counter-clockwise; display needs 90 clockwise
    UpperRight = 6,

    /// Rotated 90 degrees clockwise; display needs 270 clockwise
    LowerLeft = 8,
}

impl Orientation {
    /// Normalize a raw tag value.
    pub fn from_raw(value: u16) -> Self {
        match value {
            1 => Orientation::UpperLeft,
            3 => Orientation::LowerRight,
            6 => Orientation::UpperRight,
            8 => Orientation::LowerLeft,
            _ => Orientation::Unknown,
        }
    }

    /// The raw tag value (0 for unknown).
    #[inline]
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Clockwise rotation in degrees that displays the image upright.
    pub fn rotation_degrees(self) -> u16 {
        match self {
            Orientation::Unknown | Orientation::UpperLeft => 0,
            Orientation::LowerRight => 180,
            Orientation::UpperRight => 90,
            Orientation::LowerLeft => 270,
        }
    }
}

// =============================================================================
// Geolocation
// =============================================================================

/// One GPS axis as degrees, minutes and seconds plus a hemisphere letter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GeoCoordinate {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,

    /// 'N', 'S', 'E' or 'W'; NUL when the reference tag was absent
    pub direction: char,
}

impl GeoCoordinate {
    /// Decimal degrees, negative for the southern and western hemispheres.
    pub fn to_decimal(&self) -> f64 {
        let magnitude = self.degrees + self.minutes / 60.0 + self.seconds / 3600.0;
        match self.direction {
            'S' | 'W' => -magnitude,
            _ => magnitude,
        }
    }
}

/// GPS position decoded from the GPS sub-IFD.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GeoLocation {
    /// Signed decimal degrees
    pub latitude: f64,

    /// Signed decimal degrees
    pub longitude: f64,

    /// Meters, negative below sea level
    pub altitude: f64,

    pub altitude_below_sea_level: bool,

    pub lat_components: GeoCoordinate,
    pub lon_components: GeoCoordinate,

    /// Set once a complete latitude (three rationals) has been decoded
    pub valid: bool,
}

// =============================================================================
// ExifInfo
// =============================================================================

/// Metadata decoded from one EXIF segment.
///
/// Fields the file does not carry keep their default (empty string, zero,
/// `false`, [`Orientation::Unknown`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExifInfo {
    /// Byte order declared by the TIFF header, `None` if it was never reached
    pub byte_order: Option<ByteOrder>,

    // IFD0
    pub image_description: String,
    pub make: String,
    pub model: String,
    pub orientation: Orientation,
    pub bits_per_sample: u16,
    pub software: String,
    pub date_time: String,
    pub copyright: String,

    // EXIF sub-IFD
    pub date_time_original: String,
    pub date_time_digitized: String,
    pub sub_sec_time_original: String,

    /// Seconds
    pub exposure_time: f64,
    pub f_number: f64,
    pub iso_speed_ratings: u16,

    /// APEX value
    pub shutter_speed_value: f64,

    /// EV
    pub exposure_bias_value: f64,

    /// Meters
    pub subject_distance: f64,

    /// Millimeters
    pub focal_length: f64,
    pub focal_length_in_35mm: u16,
    pub flash: bool,
    pub metering_mode: u16,

    /// Width recorded in the metadata, independent of the encoded pixels
    pub image_width: u32,

    /// Height recorded in the metadata, independent of the encoded pixels
    pub image_height: u32,

    // GPS sub-IFD
    pub geo_location: GeoLocation,
}

// =============================================================================
// Tests
// =============================================================================
