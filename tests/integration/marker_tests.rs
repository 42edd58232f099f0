//! Marker scanning and segment location over encoder output.

use exif_transplant::{locate_exif_segment, scan_markers, ExifError, ScanMode};

use super::test_utils::*;

#[test]
fn test_scan_encoder_output() {
    let buf = create_test_jpeg(64, 64, 85);
    let scan = scan_markers(&buf, ScanMode::Strict).unwrap();

    let names: Vec<_> = scan.segments.iter().map(|s| s.name).collect();
    assert_eq!(names.first(), Some(&"SOI"));
    assert_eq!(names.last(), Some(&"EOI"));
    for expected in ["DQT", "SOF0", "DHT", "SOS"] {
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }
    assert_eq!(scan.exif, None);
}

#[test]
fn test_segments_are_ordered_and_in_bounds() {
    let buf = insert_exif(
        &create_test_jpeg(48, 32, 75),
        &camera_tiff(ByteOrderType::LittleEndian),
    );
    let scan = scan_markers(&buf, ScanMode::Strict).unwrap();

    for pair in scan.segments.windows(2) {
        assert!(pair[0].offset + pair[0].size <= pair[1].offset);
    }
    for segment in &scan.segments {
        assert_eq!(segment.signature, 0xFF);
        assert!(segment.offset + segment.size <= buf.len());
    }
}

#[test]
fn test_scanner_and_locator_agree() {
    let tiff = camera_tiff(ByteOrderType::BigEndian);
    let buf = insert_exif(&create_test_jpeg(32, 32, 80), &tiff);

    let scan = scan_markers(&buf, ScanMode::Strict).unwrap();
    let segment = locate_exif_segment(&buf).unwrap();

    assert_eq!(segment.start, 2);
    assert_eq!(segment.length, app1_segment(&tiff).len());
    assert_eq!(scan.exif, Some(segment.range()));
    assert_eq!(scan.segments[1].name, "EXIF");
}

#[test]
fn test_missing_eoi() {
    let mut buf = insert_exif(
        &create_test_jpeg(32, 32, 80),
        &orientation_tiff(ByteOrderType::LittleEndian, 1),
    );
    buf.truncate(buf.len() - 2);

    assert!(matches!(
        scan_markers(&buf, ScanMode::Strict),
        Err(ExifError::NoJpeg)
    ));
    let scan = scan_markers(&buf, ScanMode::Relaxed).unwrap();
    assert!(scan.exif.is_some());
    assert!(locate_exif_segment(&buf).is_ok());
}

#[test]
fn test_segments_serialize() {
    let buf = create_test_jpeg(16, 16, 80);
    let scan = scan_markers(&buf, ScanMode::Strict).unwrap();

    let json = serde_json::to_value(&scan.segments).unwrap();
    assert_eq!(json[0]["name"], "SOI");
    assert_eq!(json[0]["offset"], 0);
    assert_eq!(json[0]["size"], 2);
}
