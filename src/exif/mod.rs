//! Decoded EXIF metadata.
//!
//! [`decode_exif`] turns the APP1 segment of a JPEG into an [`ExifInfo`].
//! The file-level helpers read at most 20 MB by default.

mod gps;
mod info;
mod reader;

pub use info::{ExifInfo, GeoCoordinate, GeoLocation, Orientation};
pub use reader::{
    decode_exif, decode_exif_file, parse_exif_bytes, parse_exif_file, parse_exif_file_with_limit,
    read_orientation, read_orientation_with_limit, ParseReport,
};
