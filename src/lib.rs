//! # exif-transplant
//!
//! Bounds-checked EXIF reading for JPEG files, and byte-level EXIF transplant
//! from one JPEG into another.
//!
//! Every offset found in a file is checked against the buffer before it is
//! followed, so arbitrary input yields a typed error instead of a panic.
//!
//! ## Features
//!
//! - **Marker scanning**: lists every recognized JPEG marker segment
//! - **EXIF decoding**: IFD0, EXIF and GPS directories in either byte order
//! - **GPS reconstruction**: degrees/minutes/seconds to signed decimal degrees
//! - **EXIF transplant**: copies the APP1 segment verbatim, pixel data untouched
//!
//! ## Architecture
//!
//! - [`io`] - Byte decoding primitives and bounded file access
//! - [`mod@format`] - JPEG marker handling and TIFF/IFD parsing
//! - [`exif`] - The decoded [`ExifInfo`] record and parse entry points
//! - [`transplant`] - EXIF copy between JPEG files
//! - [`config`] - CLI types
//!
//! ## Example
//!
//! ```rust,no_run
//! use exif_transplant::{copy_exif, parse_exif_file, read_orientation};
//!
//! let info = parse_exif_file("photo.jpg")?;
//! println!("{} {} taken {}", info.make, info.model, info.date_time_original);
//! if info.geo_location.valid {
//!     println!("at {}, {}", info.geo_location.latitude, info.geo_location.longitude);
//! }
//!
//! let rotation = read_orientation("photo.jpg").rotation_degrees();
//! println!("rotate {rotation} degrees to display upright");
//!
//! assert!(copy_exif("photo.jpg", "resized.jpg"));
//! # Ok::<(), exif_transplant::ExifError>(())
//! ```

pub mod config;
pub mod error;
pub mod exif;
pub mod format;
pub mod io;
pub mod transplant;

// Re-export commonly used types
pub use config::{Cli, Command};
pub use error::{Corruption, ExifError, IoError};
pub use exif::{
    decode_exif, decode_exif_file, parse_exif_bytes, parse_exif_file, parse_exif_file_with_limit,
    read_orientation, read_orientation_with_limit, ExifInfo, GeoCoordinate, GeoLocation,
    Orientation, ParseReport,
};
pub use format::jpeg::{
    locate_exif_segment, scan_markers, ExifSegment, MarkerScan, ScanMode, SegmentInfo,
};
pub use format::tiff::{walk_ifd, ByteOrder, Ifd, IfdEntry, TiffHeader};
pub use io::DEFAULT_MAX_FILE_SIZE;
pub use transplant::{copy_exif, graft_exif, try_copy_exif, try_copy_exif_with_limit};
