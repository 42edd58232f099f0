//! Test utilities for integration tests.
//!
//! Real baseline JPEGs come from the `image` crate's encoder; EXIF payloads
//! come from [`TiffBuilder`], which lays out IFD0 and the EXIF/GPS sub-IFDs
//! in either byte order and is then spliced into a JPEG after its SOI.

use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

use exif_transplant::locate_exif_segment;

// =============================================================================
// Test JPEG Creation
// =============================================================================

/// Create a test RGB JPEG image.
pub fn create_test_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let r = (x % 256) as u8;
        let g = (y % 256) as u8;
        let b = ((x + y) % 256) as u8;
        Rgb([r, g, b])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(&img).unwrap();
    buf
}

/// Insert an APP1/EXIF segment carrying `tiff` right after the SOI marker.
pub fn insert_exif(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG");

    let mut out = vec![0xFF, 0xD8];
    out.extend_from_slice(&app1_segment(tiff));
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Build a complete APP1 segment (marker, length, signature, TIFF data).
pub fn app1_segment(tiff: &[u8]) -> Vec<u8> {
    let length = u16::try_from(tiff.len() + 8).expect("EXIF payload too large for one segment");

    let mut seg = vec![0xFF, 0xE1];
    seg.extend_from_slice(&length.to_be_bytes());
    seg.extend_from_slice(b"Exif\0\0");
    seg.extend_from_slice(tiff);
    seg
}

/// The bytes of the EXIF segment in `jpeg`, marker included.
pub fn exif_segment_bytes(jpeg: &[u8]) -> &[u8] {
    let segment = locate_exif_segment(jpeg).unwrap();
    &jpeg[segment.range()]
}

/// Write `data` to `name` inside `dir` and return the full path.
pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

// =============================================================================
// TIFF/EXIF Builder
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

/// A value to store in a directory entry.
#[derive(Clone, Debug)]
pub enum Value {
    Byte(u8),
    Ascii(String),
    Short(u16),
    Long(u32),
    Rationals(Vec<(u32, u32)>),
}

impl Value {
    pub fn ascii(s: &str) -> Self {
        Value::Ascii(s.to_string())
    }

    pub fn rational(numerator: u32, denominator: u32) -> Self {
        Value::Rationals(vec![(numerator, denominator)])
    }

    pub fn dms(degrees: u32, minutes: u32, seconds: u32) -> Self {
        Value::Rationals(vec![(degrees, 1), (minutes, 1), (seconds, 1)])
    }
}

/// Builder for the TIFF structure inside an EXIF segment.
pub struct TiffBuilder {
    byte_order: ByteOrderType,
    ifd0: Vec<(u16, Value)>,
    exif: Vec<(u16, Value)>,
    gps: Vec<(u16, Value)>,
}

const TAG_EXIF_POINTER: u16 = 0x8769;
const TAG_GPS_POINTER: u16 = 0x8825;

impl TiffBuilder {
    pub fn new(byte_order: ByteOrderType) -> Self {
        Self {
            byte_order,
            ifd0: Vec::new(),
            exif: Vec::new(),
            gps: Vec::new(),
        }
    }

    pub fn ifd0(mut self, tag: u16, value: Value) -> Self {
        self.ifd0.push((tag, value));
        self
    }

    pub fn exif(mut self, tag: u16, value: Value) -> Self {
        self.exif.push((tag, value));
        self
    }

    pub fn gps(mut self, tag: u16, value: Value) -> Self {
        self.gps.push((tag, value));
        self
    }

    /// Build the TIFF data: header, IFD0, EXIF IFD, GPS IFD, then the
    /// out-of-line value area.
    pub fn build(self) -> Vec<u8> {
        let ifd_size = |entries: usize| 2 + 12 * entries + 4;

        let mut ifd0 = self.ifd0.clone();
        let ifd0_count = ifd0.len()
            + usize::from(!self.exif.is_empty())
            + usize::from(!self.gps.is_empty());

        let ifd0_offset = 8;
        let exif_offset = ifd0_offset + ifd_size(ifd0_count);
        let exif_size = if self.exif.is_empty() {
            0
        } else {
            ifd_size(self.exif.len())
        };
        let gps_offset = exif_offset + exif_size;
        let gps_size = if self.gps.is_empty() {
            0
        } else {
            ifd_size(self.gps.len())
        };
        let data_offset = gps_offset + gps_size;

        if !self.exif.is_empty() {
            ifd0.push((TAG_EXIF_POINTER, Value::Long(exif_offset as u32)));
        }
        if !self.gps.is_empty() {
            ifd0.push((TAG_GPS_POINTER, Value::Long(gps_offset as u32)));
        }

        let mut out = Vec::new();
        match self.byte_order {
            ByteOrderType::LittleEndian => out.extend_from_slice(b"II"),
            ByteOrderType::BigEndian => out.extend_from_slice(b"MM"),
        }
        self.write_u16(&mut out, 42);
        self.write_u32(&mut out, ifd0_offset as u32);

        let mut data = Vec::new();
        for entries in [&ifd0, &self.exif, &self.gps] {
            if entries.is_empty() {
                continue;
            }
            self.write_u16(&mut out, entries.len() as u16);
            for (tag, value) in entries.iter() {
                self.write_entry(&mut out, &mut data, data_offset, *tag, value);
            }
            self.write_u32(&mut out, 0);
        }

        assert_eq!(out.len(), data_offset);
        out.extend_from_slice(&data);
        out
    }

    fn write_entry(
        &self,
        out: &mut Vec<u8>,
        data: &mut Vec<u8>,
        data_offset: usize,
        tag: u16,
        value: &Value,
    ) {
        self.write_u16(out, tag);

        match value {
            Value::Byte(b) => {
                self.write_u16(out, 1);
                self.write_u32(out, 1);
                out.extend_from_slice(&[*b, 0, 0, 0]);
            }
            Value::Ascii(s) => {
                let mut bytes = s.as_bytes().to_vec();
                bytes.push(0);
                self.write_u16(out, 2);
                self.write_u32(out, bytes.len() as u32);
                if bytes.len() <= 4 {
                    bytes.resize(4, 0);
                    out.extend_from_slice(&bytes);
                } else {
                    self.write_u32(out, (data_offset + data.len()) as u32);
                    data.extend_from_slice(&bytes);
                }
            }
            Value::Short(v) => {
                self.write_u16(out, 3);
                self.write_u32(out, 1);
                self.write_u16(out, *v);
                out.extend_from_slice(&[0, 0]);
            }
            Value::Long(v) => {
                self.write_u16(out, 4);
                self.write_u32(out, 1);
                self.write_u32(out, *v);
            }
            Value::Rationals(values) => {
                self.write_u16(out, 5);
                self.write_u32(out, values.len() as u32);
                self.write_u32(out, (data_offset + data.len()) as u32);
                for (numerator, denominator) in values {
                    self.write_u32(data, *numerator);
                    self.write_u32(data, *denominator);
                }
            }
        }
    }

    fn write_u16(&self, data: &mut Vec<u8>, value: u16) {
        match self.byte_order {
            ByteOrderType::LittleEndian => data.extend(&value.to_le_bytes()),
            ByteOrderType::BigEndian => data.extend(&value.to_be_bytes()),
        }
    }

    fn write_u32(&self, data: &mut Vec<u8>, value: u32) {
        match self.byte_order {
            ByteOrderType::LittleEndian => data.extend(&value.to_le_bytes()),
            ByteOrderType::BigEndian => data.extend(&value.to_be_bytes()),
        }
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A camera-like EXIF payload exercising every decoded field.
pub fn camera_tiff(byte_order: ByteOrderType) -> Vec<u8> {
    TiffBuilder::new(byte_order)
        .ifd0(0x010E, Value::ascii("Harbor at dusk"))
        .ifd0(0x010F, Value::ascii("NIKON CORPORATION"))
        .ifd0(0x0110, Value::ascii("NIKON D750"))
        .ifd0(0x0112, Value::Short(6))
        .ifd0(0x0102, Value::Short(8))
        .ifd0(0x0131, Value::ascii("Ver.1.10"))
        .ifd0(0x0132, Value::ascii("2021:06:01 18:30:00"))
        .ifd0(0x8298, Value::ascii("J. Doe"))
        .exif(0x829A, Value::rational(1, 250))
        .exif(0x829D, Value::rational(28, 10))
        .exif(0x8827, Value::Short(400))
        .exif(0x9003, Value::ascii("2021:06:01 18:29:58"))
        .exif(0x9004, Value::ascii("2021:06:01 18:29:58"))
        .exif(0x9201, Value::rational(8, 1))
        .exif(0x9204, Value::rational(0, 1))
        .exif(0x9206, Value::rational(35, 10))
        .exif(0x9207, Value::Short(5))
        .exif(0x9209, Value::Short(1))
        .exif(0x920A, Value::rational(50, 1))
        .exif(0x9291, Value::ascii("42"))
        .exif(0xA002, Value::Long(6016))
        .exif(0xA003, Value::Short(4016))
        .exif(0xA405, Value::Short(75))
        .gps(0x0001, Value::ascii("S"))
        .gps(0x0002, Value::dms(40, 26, 46))
        .gps(0x0003, Value::ascii("W"))
        .gps(0x0004, Value::dms(79, 58, 56))
        .gps(0x0005, Value::Byte(0))
        .gps(0x0006, Value::rational(3005, 10))
        .build()
}

/// A payload with only an orientation tag.
pub fn orientation_tiff(byte_order: ByteOrderType, orientation: u16) -> Vec<u8> {
    TiffBuilder::new(byte_order)
        .ifd0(0x0112, Value::Short(orientation))
        .build()
}
