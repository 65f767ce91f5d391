//! Integration tests for the JPEG/EXIF pipeline

extern crate std;

use byteorder::{LittleEndian, WriteBytesExt};

use exifkit::jpeg::{JpegFile, StripPolicy};
use exifkit::{ExifError, TagValue};

/// Builds a small JPEG with an EXIF APP1 segment, a quantization
/// table and a scan, the way a camera would lay it out.
fn sample_jpeg_with_exif() -> Vec<u8> {
    // EXIF payload: II TIFF header and one primary directory holding
    // Orientation = 6 inline
    let mut exif = Vec::new();
    exif.extend_from_slice(b"Exif\0\0");
    exif.extend_from_slice(b"II");
    exif.write_u16::<LittleEndian>(0x2A).unwrap();
    exif.write_u32::<LittleEndian>(8).unwrap();
    exif.write_u16::<LittleEndian>(1).unwrap();
    exif.write_u16::<LittleEndian>(0x112).unwrap();
    exif.write_u16::<LittleEndian>(3).unwrap();
    exif.write_u32::<LittleEndian>(1).unwrap();
    exif.write_u16::<LittleEndian>(6).unwrap();
    exif.write_u16::<LittleEndian>(0).unwrap();
    exif.write_u32::<LittleEndian>(0).unwrap();

    let mut data = vec![0xFF, 0xD8]; // SOI
    data.extend_from_slice(&[0xFF, 0xE1]); // APP1
    data.extend_from_slice(&((exif.len() + 2) as u16).to_be_bytes());
    data.extend_from_slice(&exif);
    data.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x04, 0x01, 0x02]); // DQT
    data.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x04, 0x03, 0x04]); // SOS
    data.extend_from_slice(&[0x05, 0x06, 0x07, 0x08]); // image data
    data.extend_from_slice(&[0xFF, 0xD9]); // EOI
    data
}

#[test]
fn test_untouched_file_round_trips_byte_for_byte() {
    let original = sample_jpeg_with_exif();
    let jpeg = JpegFile::from_bytes(&original).unwrap();
    std::assert_eq!(jpeg.write_bytes().unwrap(), original);
}

#[test]
fn test_double_round_trip_is_stable() {
    let original = sample_jpeg_with_exif();
    let once = JpegFile::from_bytes(&original).unwrap().write_bytes().unwrap();
    let twice = JpegFile::from_bytes(&once).unwrap().write_bytes().unwrap();
    std::assert_eq!(once, twice);
}

#[test]
fn test_complete_metadata_workflow() {
    // Load a camera-style file, edit tags and location, save, reload
    let jpeg_bytes = sample_jpeg_with_exif();
    let mut jpeg = JpegFile::from_bytes(&jpeg_bytes).unwrap();

    std::assert_eq!(
        jpeg.get_tag("Orientation").unwrap(),
        Some(TagValue::Short(vec![6]))
    );

    jpeg.set_tag("Make", "Canon").unwrap();
    jpeg.set_tag("Model", "EOS 5D").unwrap();
    jpeg.set_tag("DateTimeOriginal", "2019:08:05 12:00:00").unwrap();
    jpeg.set_geo(-37.312312, 45.412321).unwrap();

    let saved = jpeg.write_bytes().unwrap();
    let reloaded = JpegFile::from_bytes(&saved).unwrap();

    std::assert_eq!(
        reloaded.get_tag("Make").unwrap(),
        Some(TagValue::Ascii("Canon".to_string()))
    );
    std::assert_eq!(
        reloaded.get_tag("Model").unwrap(),
        Some(TagValue::Ascii("EOS 5D".to_string()))
    );
    std::assert_eq!(
        reloaded.get_tag("DateTimeOriginal").unwrap(),
        Some(TagValue::Ascii("2019:08:05 12:00:00".to_string()))
    );

    let (lat, lng) = reloaded.get_geo().unwrap();
    std::assert!((lat + 37.312312).abs() < 1e-6);
    std::assert!((lng - 45.412321).abs() < 1e-6);

    // The pixel data is untouched by any of this
    let scan = reloaded.segments().iter().find(|s| s.marker() == 0xDA).unwrap();
    std::assert_eq!(scan.data(), &[0x03, 0x04]);
}

#[test]
fn test_exif_created_for_file_without_one() {
    // A bare file: no EXIF anywhere
    let bare = vec![0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x04, 0x01, 0x02, 0xFF, 0xD9];
    let mut jpeg = JpegFile::from_bytes(&bare).unwrap();
    std::assert!(jpeg.exif().is_none());

    jpeg.set_tag("Artist", "nobody").unwrap();
    let saved = jpeg.write_bytes().unwrap();

    let reloaded = JpegFile::from_bytes(&saved).unwrap();
    std::assert!(reloaded.exif().is_some());
    std::assert_eq!(
        reloaded.get_tag("Artist").unwrap(),
        Some(TagValue::Ascii("nobody".to_string()))
    );
    // The created APP1 leads the segment list
    std::assert_eq!(reloaded.segments()[0].marker(), 0xE1);
}

#[test]
fn test_strip_then_reload_has_no_exif() {
    let mut jpeg = JpegFile::from_bytes(&sample_jpeg_with_exif()).unwrap();
    std::assert!(jpeg.exif().is_some());

    jpeg.strip_metadata(&StripPolicy::default());
    let saved = jpeg.write_bytes().unwrap();

    let reloaded = JpegFile::from_bytes(&saved).unwrap();
    std::assert!(reloaded.exif().is_none());
    // The image itself survives
    std::assert!(reloaded.segments().iter().any(|s| s.marker() == 0xDA));
}

#[test]
fn test_garbage_and_truncation_fail_cleanly() {
    std::assert!(JpegFile::from_bytes(b"").is_err());
    std::assert!(JpegFile::from_bytes(b"asl;dkfjasl;kdjfsld").is_err());

    // Chop the sample file mid-segment
    let original = sample_jpeg_with_exif();
    std::assert!(JpegFile::from_bytes(&original[..10]).is_err());
}

#[test]
fn test_corrupted_tiff_header_fails_load() {
    let mut corrupted = sample_jpeg_with_exif();
    // The endian marker of the embedded TIFF blob sits right after the
    // segment header (4 bytes) and EXIF signature (6 bytes)
    std::assert_eq!(corrupted[12], b'I');
    corrupted[12] = b'0';
    match JpegFile::from_bytes(&corrupted) {
        Err(ExifError::InvalidFile(_)) => {}
        other => std::panic!("expected InvalidFile, got {:?}", other),
    }

    let mut corrupted = sample_jpeg_with_exif();
    // The TIFF magic byte
    std::assert_eq!(corrupted[14], 0x2A);
    corrupted[14] = 0;
    std::assert!(JpegFile::from_bytes(&corrupted).is_err());
}

#[test]
fn test_dump_walks_the_whole_structure() {
    let mut jpeg = JpegFile::from_bytes(&sample_jpeg_with_exif()).unwrap();
    jpeg.set_geo(51.522, -1.2711).unwrap();

    let mut out = Vec::new();
    jpeg.dump(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    std::assert!(text.contains("<--- TIFF start --->"));
    std::assert!(text.contains("<--- GPS start --->"));
    std::assert!(text.contains("North or South latitude"));
    std::assert!(text.contains("Scan Section:"));
}
