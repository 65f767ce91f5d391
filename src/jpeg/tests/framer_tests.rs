//! Tests for the JPEG segment framer

extern crate std;

use crate::exif::errors::ExifError;
use crate::jpeg::segment::SegmentBody;
use crate::jpeg::tests::test_utils;
use crate::jpeg::JpegFile;

#[test]
fn test_round_trip_identity() {
    let original = test_utils::minimal_jpeg();
    let jpeg = JpegFile::from_bytes(&original).unwrap();
    std::assert_eq!(jpeg.write_bytes().unwrap(), original);
}

#[test]
fn test_round_trip_identity_with_metadata() {
    // Unrecognized and opaque segments must survive byte-for-byte
    let original = test_utils::jpeg_with_metadata();
    let jpeg = JpegFile::from_bytes(&original).unwrap();
    std::assert_eq!(jpeg.write_bytes().unwrap(), original);
}

#[test]
fn test_segment_framing() {
    let jpeg = JpegFile::from_bytes(&test_utils::minimal_jpeg()).unwrap();
    let segments = jpeg.segments();
    std::assert_eq!(segments.len(), 2);

    std::assert_eq!(segments[0].marker(), 0xDB);
    std::assert_eq!(segments[0].data(), &[0x01, 0x02]);

    std::assert_eq!(segments[1].marker(), 0xDA);
    std::assert_eq!(segments[1].data(), &[0x03, 0x04]);
    match segments[1].body() {
        SegmentBody::Scan { image_data } => {
            std::assert_eq!(image_data, &[0x05, 0x06, 0x07, 0x08])
        }
        other => std::panic!("expected scan body, got {:?}", other),
    }
}

#[test]
fn test_empty_stream_round_trip() {
    // Nothing but the image delimiters
    let original = vec![0xFF, 0xD8, 0xFF, 0xD9];
    let jpeg = JpegFile::from_bytes(&original).unwrap();
    std::assert_eq!(jpeg.segments().len(), 0);
    std::assert_eq!(jpeg.write_bytes().unwrap(), original);
}

#[test]
fn test_bad_soi_is_fatal() {
    match JpegFile::from_bytes(b"asl;dkfjasl;kdjfsld") {
        Err(ExifError::InvalidFile(_)) => {}
        other => std::panic!("expected InvalidFile, got {:?}", other),
    }
}

#[test]
fn test_empty_input_is_fatal() {
    std::assert!(JpegFile::from_bytes(b"").is_err());
}

#[test]
fn test_bad_delimiter_is_fatal() {
    let data = vec![0xFF, 0xD8, 0x00, 0xDB, 0x00, 0x04, 0x01, 0x02, 0xFF, 0xD9];
    match JpegFile::from_bytes(&data) {
        Err(ExifError::InvalidFile(_)) => {}
        other => std::panic!("expected InvalidFile, got {:?}", other),
    }
}

#[test]
fn test_truncated_stream_is_fatal() {
    // Ends mid-segment, before any end-of-image marker
    let data = vec![0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x10, 0x01];
    std::assert!(JpegFile::from_bytes(&data).is_err());
}

#[test]
fn test_non_exif_app1_falls_back_to_opaque() {
    // The APP1 in this stream carries "xmp", not an EXIF signature;
    // the decliner signal must not escape the framer
    let jpeg = JpegFile::from_bytes(&test_utils::jpeg_with_metadata()).unwrap();
    let app1 = jpeg.segments().iter().find(|s| s.marker() == 0xE1).unwrap();
    std::assert_eq!(app1.body(), &SegmentBody::Generic);
    std::assert!(jpeg.exif().is_none());
}
