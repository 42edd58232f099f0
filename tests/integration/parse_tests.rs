//! EXIF decoding over real encoder output.

use exif_transplant::{
    decode_exif, parse_exif_bytes, parse_exif_file, parse_exif_file_with_limit, ByteOrder,
    Corruption, ExifError, ExifInfo, IoError, Orientation,
};

use super::test_utils::*;

fn camera_jpeg(byte_order: ByteOrderType) -> Vec<u8> {
    insert_exif(&create_test_jpeg(64, 48, 85), &camera_tiff(byte_order))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

// =============================================================================
// Successful Parses
// =============================================================================

#[test]
fn test_parse_camera_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "camera.jpg", &camera_jpeg(ByteOrderType::LittleEndian));

    let info = parse_exif_file(&path).unwrap();

    assert_eq!(info.byte_order, Some(ByteOrder::Intel));
    assert_eq!(info.image_description, "Harbor at dusk");
    assert_eq!(info.make, "NIKON CORPORATION");
    assert_eq!(info.model, "NIKON D750");
    assert_eq!(info.orientation, Orientation::UpperRight);
    assert_eq!(info.bits_per_sample, 8);
    assert_eq!(info.software, "Ver.1.10");
    assert_eq!(info.date_time, "2021:06:01 18:30:00");
    assert_eq!(info.copyright, "J. Doe");

    assert_close(info.exposure_time, 0.004);
    assert_close(info.f_number, 2.8);
    assert_eq!(info.iso_speed_ratings, 400);
    assert_eq!(info.date_time_original, "2021:06:01 18:29:58");
    assert_eq!(info.date_time_digitized, "2021:06:01 18:29:58");
    assert_eq!(info.sub_sec_time_original, "42");
    assert_close(info.shutter_speed_value, 8.0);
    assert_close(info.exposure_bias_value, 0.0);
    assert_close(info.subject_distance, 3.5);
    assert_eq!(info.metering_mode, 5);
    assert!(info.flash);
    assert_close(info.focal_length, 50.0);
    assert_eq!(info.focal_length_in_35mm, 75);
    assert_eq!(info.image_width, 6016);
    assert_eq!(info.image_height, 4016);
}

#[test]
fn test_parse_gps() {
    let info = parse_exif_bytes(&camera_jpeg(ByteOrderType::LittleEndian)).unwrap();
    let gps = info.geo_location;

    assert!(gps.valid);
    assert_close(gps.latitude, -(40.0 + 26.0 / 60.0 + 46.0 / 3600.0));
    assert_close(gps.longitude, -(79.0 + 58.0 / 60.0 + 56.0 / 3600.0));
    assert!((gps.latitude + 40.446).abs() < 1e-3);
    assert_close(gps.altitude, 300.5);
    assert!(!gps.altitude_below_sea_level);
    assert_eq!(gps.lat_components.direction, 'S');
    assert_eq!(gps.lon_components.direction, 'W');
    assert_close(gps.lon_components.seconds, 56.0);
}

#[test]
fn test_big_endian_matches_little_endian() {
    let mut le = parse_exif_bytes(&camera_jpeg(ByteOrderType::LittleEndian)).unwrap();
    let mut be = parse_exif_bytes(&camera_jpeg(ByteOrderType::BigEndian)).unwrap();

    assert_eq!(le.byte_order, Some(ByteOrder::Intel));
    assert_eq!(be.byte_order, Some(ByteOrder::Motorola));

    le.byte_order = None;
    be.byte_order = None;
    assert_eq!(le, be);
}

#[test]
fn test_repeated_parses_are_identical() {
    let buf = camera_jpeg(ByteOrderType::BigEndian);
    let first = parse_exif_bytes(&buf).unwrap();
    let second = parse_exif_bytes(&buf).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_northern_hemisphere_is_positive() {
    let tiff = TiffBuilder::new(ByteOrderType::BigEndian)
        .gps(0x0002, Value::dms(40, 26, 46))
        .gps(0x0001, Value::ascii("N"))
        .build();
    let info = parse_exif_bytes(&insert_exif(&create_test_jpeg(16, 16, 80), &tiff)).unwrap();

    assert!(info.geo_location.valid);
    assert_close(info.geo_location.latitude, 40.0 + 26.0 / 60.0 + 46.0 / 3600.0);
}

#[test]
fn test_below_sea_level() {
    let tiff = TiffBuilder::new(ByteOrderType::LittleEndian)
        .gps(0x0006, Value::rational(12, 1))
        .gps(0x0005, Value::Byte(1))
        .build();
    let info = parse_exif_bytes(&insert_exif(&create_test_jpeg(16, 16, 80), &tiff)).unwrap();

    assert!(info.geo_location.altitude_below_sea_level);
    assert_close(info.geo_location.altitude, -12.0);
    assert!(!info.geo_location.valid);
}

#[test]
fn test_mismatched_formats_are_skipped() {
    let tiff = TiffBuilder::new(ByteOrderType::LittleEndian)
        .ifd0(0x010F, Value::Short(7))
        .ifd0(0x0110, Value::ascii("Model X"))
        .exif(0x829D, Value::Short(4))
        .exif(0x8827, Value::Long(800))
        .exif(0xA002, Value::ascii("wide"))
        .build();
    let info = parse_exif_bytes(&insert_exif(&create_test_jpeg(16, 16, 80), &tiff)).unwrap();

    assert_eq!(info.make, "");
    assert_eq!(info.model, "Model X");
    assert_eq!(info.f_number, 0.0);
    assert_eq!(info.iso_speed_ratings, 0);
    assert_eq!(info.image_width, 0);
}

#[test]
fn test_exif_without_sub_ifds() {
    let tiff = orientation_tiff(ByteOrderType::LittleEndian, 3);
    let info = parse_exif_bytes(&insert_exif(&create_test_jpeg(16, 16, 80), &tiff)).unwrap();

    assert_eq!(info.orientation, Orientation::LowerRight);
    assert_eq!(info.make, "");
    assert!(!info.geo_location.valid);
}

#[test]
fn test_info_serializes_to_json() {
    let info = parse_exif_bytes(&camera_jpeg(ByteOrderType::LittleEndian)).unwrap();
    let json = serde_json::to_value(&info).unwrap();

    assert_eq!(json["make"], "NIKON CORPORATION");
    assert_eq!(json["byte_order"], "Intel");
    assert_eq!(json["orientation"], "UpperRight");
    assert_eq!(json["geo_location"]["lat_components"]["direction"], "S");
    assert_eq!(json["geo_location"]["valid"], true);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_not_a_jpeg() {
    assert!(matches!(parse_exif_bytes(&[]), Err(ExifError::NoJpeg)));
    assert!(matches!(parse_exif_bytes(&[0xFF]), Err(ExifError::NoJpeg)));
    assert!(matches!(
        parse_exif_bytes(&[0xFF, 0xD8, 0xFF]),
        Err(ExifError::NoJpeg)
    ));

    let mut buf = camera_jpeg(ByteOrderType::LittleEndian);
    buf[1] = 0xD9;
    assert!(matches!(parse_exif_bytes(&buf), Err(ExifError::NoJpeg)));
}

#[test]
fn test_jpeg_without_exif() {
    let buf = create_test_jpeg(32, 32, 90);
    assert!(matches!(parse_exif_bytes(&buf), Err(ExifError::NoExif)));
}

#[test]
fn test_truncated_segment_is_corrupt() {
    let buf = camera_jpeg(ByteOrderType::LittleEndian);
    let truncated = &buf[..100];
    assert!(matches!(
        parse_exif_bytes(truncated),
        Err(ExifError::Corrupt(Corruption::SegmentOverrun { start: 2, .. }))
    ));
}

#[test]
fn test_directory_overrun_is_corrupt() {
    let mut tiff = camera_tiff(ByteOrderType::LittleEndian);
    // IFD0 entry count
    tiff[8..10].copy_from_slice(&0x2000u16.to_le_bytes());

    let buf = insert_exif(&create_test_jpeg(16, 16, 80), &tiff);
    assert!(matches!(
        parse_exif_bytes(&buf),
        Err(ExifError::Corrupt(Corruption::DirectoryOverrun {
            entries: 0x2000,
            ..
        }))
    ));
}

#[test]
fn test_unknown_byte_alignment() {
    let mut tiff = camera_tiff(ByteOrderType::LittleEndian);
    tiff[..2].copy_from_slice(b"IM");

    let buf = insert_exif(&create_test_jpeg(16, 16, 80), &tiff);
    assert!(matches!(
        parse_exif_bytes(&buf),
        Err(ExifError::UnknownByteAlignment(0x494D))
    ));
}

#[test]
fn test_missing_trailing_marker_reports_partial_info() {
    let mut buf = camera_jpeg(ByteOrderType::LittleEndian);
    let end = exif_transplant::locate_exif_segment(&buf).unwrap().end();
    buf[end] = 0x00;

    let report = decode_exif(&buf);
    assert!(matches!(
        report.outcome,
        Err(ExifError::Corrupt(Corruption::MissingTrailingMarker { .. }))
    ));
    assert_eq!(report.info.make, "NIKON CORPORATION");
    assert!(report.info.geo_location.valid);
    assert!(parse_exif_bytes(&buf).is_err());
}

#[test]
fn test_file_too_large() {
    let dir = tempfile::tempdir().unwrap();
    let buf = camera_jpeg(ByteOrderType::LittleEndian);
    let path = write_file(dir.path(), "big.jpg", &buf);

    let result = parse_exif_file_with_limit(&path, buf.len() as u64);
    assert!(matches!(
        result,
        Err(ExifError::Io(IoError::TooLarge { .. }))
    ));
    assert!(parse_exif_file_with_limit(&path, buf.len() as u64 + 1).is_ok());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = parse_exif_file(dir.path().join("absent.jpg"));
    assert!(matches!(result, Err(ExifError::Io(IoError::Open { .. }))));
}

#[test]
fn test_failed_parse_reports_default_info() {
    let report = decode_exif(&create_test_jpeg(8, 8, 80));
    assert!(!report.is_success());
    assert_eq!(report.info, ExifInfo::default());
}
