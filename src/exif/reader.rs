//! EXIF decoding entry points.
//!
//! A parse runs in three directory passes over the APP1 payload:
//!
//! 1. IFD0, which also yields the EXIF and GPS sub-IFD pointers
//! 2. The EXIF sub-IFD, if IFD0 pointed at one inside the payload
//! 3. The GPS sub-IFD, likewise
//!
//! Each entry is matched by tag and assigned only when its decoded type is
//! what the field expects. A mismatched entry is logged and skipped; the rest
//! of the directory still counts.
//!
//! After the passes, the byte following the APP1 segment must be a marker
//! byte (0xFF). When it is not, the parse fails but the fields decoded so far
//! remain available through [`ParseReport`].

use std::path::Path;

use tracing::debug;

use crate::error::{Corruption, ExifError};
use crate::format::jpeg::{locate_exif_segment, EXIF_SIGNATURE, MARKER_MAGIC};
use crate::format::tiff::{walk_ifd, ExifTag, Ifd0Tag, IfdEntry, TiffHeader};
use crate::io::{read_bounded, DEFAULT_MAX_FILE_SIZE};

use super::gps::GpsAccumulator;
use super::info::{ExifInfo, Orientation};

// =============================================================================
// ParseReport
// =============================================================================

/// Outcome of one parse together with everything decoded before it ended.
#[derive(Debug, Clone)]
pub struct ParseReport {
    /// Fields populated up to the point of success or failure
    pub info: ExifInfo,

    /// `Ok` if every structural check passed
    pub outcome: Result<(), ExifError>,
}

impl ParseReport {
    fn failed(error: ExifError) -> Self {
        Self {
            info: ExifInfo::default(),
            outcome: Err(error),
        }
    }

    /// Whether the parse completed without error.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Discard partial results on failure.
    pub fn into_result(self) -> Result<ExifInfo, ExifError> {
        self.outcome.map(|()| self.info)
    }
}

// =============================================================================
// Decoder
// =============================================================================

/// Per-parse builder; never shared between parses.
#[derive(Debug, Default)]
struct ExifDecoder {
    info: ExifInfo,
    exif_ifd: Option<usize>,
    gps_ifd: Option<usize>,
}

impl ExifDecoder {
    fn run(&mut self, buf: &[u8]) -> Result<(), ExifError> {
        let segment = locate_exif_segment(buf)?;
        let payload = &buf[segment.payload_range()];

        if !payload.starts_with(EXIF_SIGNATURE) {
            return Err(ExifError::NoExif);
        }

        let header = TiffHeader::parse(payload, EXIF_SIGNATURE.len())?;
        self.info.byte_order = Some(header.byte_order);

        let ifd0 = walk_ifd(payload, header.first_ifd_offset, &header)?;
        for entry in &ifd0.entries {
            self.visit_ifd0(entry, &header, payload.len());
        }

        if let Some(offset) = self.exif_ifd {
            let ifd = walk_ifd(payload, offset, &header)?;
            for entry in &ifd.entries {
                self.visit_exif(entry);
            }
        }

        if let Some(offset) = self.gps_ifd {
            let ifd = walk_ifd(payload, offset, &header)?;
            let mut gps = GpsAccumulator::default();
            for entry in &ifd.entries {
                gps.visit(entry);
            }
            self.info.geo_location = gps.finish();
        }

        // The locator guarantees two bytes follow the segment.
        let end = segment.end();
        match buf.get(end) {
            Some(&MARKER_MAGIC) => Ok(()),
            found => Err(Corruption::MissingTrailingMarker {
                offset: end,
                found: found.copied().unwrap_or_default(),
            }
            .into()),
        }
    }

    fn visit_ifd0(&mut self, entry: &IfdEntry, header: &TiffHeader, payload_len: usize) {
        let Some(tag) = Ifd0Tag::from_u16(entry.tag) else {
            return;
        };
        let info = &mut self.info;

        let accepted = match tag {
            Ifd0Tag::BitsPerSample => assign(&mut info.bits_per_sample, entry.as_short()),
            Ifd0Tag::ImageDescription => assign(&mut info.image_description, text(entry)),
            Ifd0Tag::Make => assign(&mut info.make, text(entry)),
            Ifd0Tag::Model => assign(&mut info.model, text(entry)),
            Ifd0Tag::Orientation => assign(
                &mut info.orientation,
                entry.as_short().map(Orientation::from_raw),
            ),
            Ifd0Tag::Software => assign(&mut info.software, text(entry)),
            Ifd0Tag::DateTime => assign(&mut info.date_time, text(entry)),
            Ifd0Tag::Copyright => assign(&mut info.copyright, text(entry)),
            Ifd0Tag::ExifIfdPointer => {
                self.exif_ifd = sub_ifd_offset(entry, header, payload_len);
                true
            }
            Ifd0Tag::GpsIfdPointer => {
                self.gps_ifd = sub_ifd_offset(entry, header, payload_len);
                true
            }
        };

        if !accepted {
            skipped("IFD0", entry);
        }
    }

    fn visit_exif(&mut self, entry: &IfdEntry) {
        let Some(tag) = ExifTag::from_u16(entry.tag) else {
            return;
        };
        let info = &mut self.info;

        let accepted = match tag {
            ExifTag::ExposureTime => assign(&mut info.exposure_time, entry.as_rational()),
            ExifTag::FNumber => assign(&mut info.f_number, entry.as_rational()),
            ExifTag::IsoSpeedRatings => assign(&mut info.iso_speed_ratings, entry.as_short()),
            ExifTag::DateTimeOriginal => assign(&mut info.date_time_original, text(entry)),
            ExifTag::DateTimeDigitized => assign(&mut info.date_time_digitized, text(entry)),
            ExifTag::ShutterSpeedValue => {
                assign(&mut info.shutter_speed_value, entry.as_rational())
            }
            ExifTag::ExposureBiasValue => {
                assign(&mut info.exposure_bias_value, entry.as_rational())
            }
            ExifTag::SubjectDistance => assign(&mut info.subject_distance, entry.as_rational()),
            ExifTag::MeteringMode => assign(&mut info.metering_mode, entry.as_short()),
            ExifTag::Flash => assign(&mut info.flash, entry.as_short().map(|v| v != 0)),
            ExifTag::FocalLength => assign(&mut info.focal_length, entry.as_rational()),
            ExifTag::SubSecTimeOriginal => assign(&mut info.sub_sec_time_original, text(entry)),
            ExifTag::PixelXDimension => assign(&mut info.image_width, entry.as_u32()),
            ExifTag::PixelYDimension => assign(&mut info.image_height, entry.as_u32()),
            ExifTag::FocalLengthIn35mmFilm => {
                assign(&mut info.focal_length_in_35mm, entry.as_short())
            }
        };

        if !accepted {
            skipped("EXIF", entry);
        }
    }
}

fn assign<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

fn text(entry: &IfdEntry) -> Option<String> {
    entry.as_str().map(str::to_owned)
}

fn skipped(directory: &str, entry: &IfdEntry) {
    debug!(
        directory,
        tag = entry.tag,
        field_type = entry.field_type_raw,
        "skipping entry with unexpected format"
    );
}

/// Resolve a sub-IFD pointer, dropping it if its entry count could not be read.
fn sub_ifd_offset(entry: &IfdEntry, header: &TiffHeader, payload_len: usize) -> Option<usize> {
    entry.field_type?;

    let offset = header.resolve(entry.value_offset)?;
    if offset.checked_add(4).map_or(true, |end| end > payload_len) {
        debug!(
            tag = entry.tag,
            offset, payload_len, "sub-IFD pointer outside EXIF payload, skipping"
        );
        return None;
    }
    Some(offset)
}

// =============================================================================
// Public API
// =============================================================================

/// Decode the EXIF segment of an in-memory JPEG, keeping partial results.
pub fn decode_exif(buf: &[u8]) -> ParseReport {
    let mut decoder = ExifDecoder::default();
    let outcome = decoder.run(buf);
    if let Err(ref e) = outcome {
        debug!(error = %e, "EXIF parse failed");
    }
    ParseReport {
        info: decoder.info,
        outcome,
    }
}

/// Read a file (refusing files of `limit` bytes or more) and decode it.
pub fn decode_exif_file(path: impl AsRef<Path>, limit: u64) -> ParseReport {
    match read_bounded(path.as_ref(), limit) {
        Ok(buf) => decode_exif(&buf),
        Err(e) => ParseReport::failed(e.into()),
    }
}

/// Decode the EXIF segment of an in-memory JPEG.
///
/// # Errors
/// - `NoJpeg` if the buffer is shorter than 4 bytes or lacks SOI
/// - `NoExif` if there is no APP1 segment carrying `Exif\0\0`
/// - `UnknownByteAlignment` if the TIFF byte order is neither II nor MM
/// - `Corrupt` if any structural bounds check fails
pub fn parse_exif_bytes(buf: &[u8]) -> Result<ExifInfo, ExifError> {
    decode_exif(buf).into_result()
}

/// Decode the EXIF segment of a JPEG file no larger than 20 MB.
pub fn parse_exif_file(path: impl AsRef<Path>) -> Result<ExifInfo, ExifError> {
    parse_exif_file_with_limit(path, DEFAULT_MAX_FILE_SIZE)
}

/// Like [`parse_exif_file`], with a caller-chosen size ceiling.
pub fn parse_exif_file_with_limit(
    path: impl AsRef<Path>,
    limit: u64,
) -> Result<ExifInfo, ExifError> {
    decode_exif_file(path, limit).into_result()
}

/// Orientation of a JPEG file, [`Orientation::Unknown`] on any failure.
pub fn read_orientation(path: impl AsRef<Path>) -> Orientation {
    read_orientation_with_limit(path, DEFAULT_MAX_FILE_SIZE)
}

/// Like [`read_orientation`], with a caller-chosen size ceiling.
pub fn read_orientation_with_limit(path: impl AsRef<Path>, limit: u64) -> Orientation {
    let path = path.as_ref();
    match parse_exif_file_with_limit(path, limit) {
        Ok(info) => info.orientation,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no orientation");
            Orientation::Unknown
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
