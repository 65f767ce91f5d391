//! Tests for the tag value codec

extern crate std;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::exif::errors::ExifError;
use crate::exif::value::{type_size, Rational, SRational, TagValue};
use crate::io::byte_order::{BigEndianHandler, LittleEndianHandler};

#[test]
fn test_type_sizes() {
    std::assert_eq!(type_size(1).unwrap(), 1); // BYTE
    std::assert_eq!(type_size(2).unwrap(), 1); // ASCII
    std::assert_eq!(type_size(3).unwrap(), 2); // SHORT
    std::assert_eq!(type_size(4).unwrap(), 4); // LONG
    std::assert_eq!(type_size(5).unwrap(), 8); // RATIONAL
    std::assert_eq!(type_size(7).unwrap(), 1); // UNDEFINED
    std::assert_eq!(type_size(9).unwrap(), 4); // SLONG
    std::assert_eq!(type_size(10).unwrap(), 8); // SRATIONAL
}

#[test]
fn test_type_size_unknown_codes() {
    for code in [0u16, 6, 8, 11, 12, 16] {
        match type_size(code) {
            Err(ExifError::UnsupportedType(c)) => std::assert_eq!(c, code),
            other => std::panic!("expected UnsupportedType for {}, got {:?}", code, other),
        }
    }
}

#[test]
fn test_decode_short_little_endian() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x1234).unwrap();
    buffer.write_u16::<LittleEndian>(0x5678).unwrap();

    let value = TagValue::decode(3, 2, &buffer, &LittleEndianHandler).unwrap();
    std::assert_eq!(value, TagValue::Short(vec![0x1234, 0x5678]));
}

#[test]
fn test_decode_short_big_endian() {
    let mut buffer = Vec::new();
    buffer.write_u16::<BigEndian>(0x1234).unwrap();

    let value = TagValue::decode(3, 1, &buffer, &BigEndianHandler).unwrap();
    std::assert_eq!(value, TagValue::Short(vec![0x1234]));
}

#[test]
fn test_decode_rational() {
    let mut buffer = Vec::new();
    buffer.write_u32::<LittleEndian>(72).unwrap();
    buffer.write_u32::<LittleEndian>(1).unwrap();

    let value = TagValue::decode(5, 1, &buffer, &LittleEndianHandler).unwrap();
    std::assert_eq!(value, TagValue::Rational(vec![Rational::new(72, 1)]));
}

#[test]
fn test_decode_srational_negative() {
    let mut buffer = Vec::new();
    buffer.write_i32::<BigEndian>(-3).unwrap();
    buffer.write_i32::<BigEndian>(2).unwrap();

    let value = TagValue::decode(10, 1, &buffer, &BigEndianHandler).unwrap();
    std::assert_eq!(value, TagValue::SRational(vec![SRational::new(-3, 2)]));
}

#[test]
fn test_decode_ascii_appends_missing_nul() {
    // A deliberate leniency: unterminated ASCII is corrected, not rejected
    let value = TagValue::decode(2, 5, b"Canon", &LittleEndianHandler).unwrap();
    std::assert_eq!(value, TagValue::Ascii("Canon\0".to_string()));
    std::assert_eq!(value.as_str(), Some("Canon"));
}

#[test]
fn test_decode_ascii_terminated_is_kept() {
    let value = TagValue::decode(2, 6, b"Canon\0", &LittleEndianHandler).unwrap();
    std::assert_eq!(value, TagValue::Ascii("Canon\0".to_string()));
}

#[test]
fn test_decode_byte_and_undefined_passthrough() {
    let bytes = [2u8, 2, 0, 0];
    std::assert_eq!(
        TagValue::decode(1, 4, &bytes, &LittleEndianHandler).unwrap(),
        TagValue::Byte(vec![2, 2, 0, 0])
    );
    std::assert_eq!(
        TagValue::decode(7, 4, &bytes, &BigEndianHandler).unwrap(),
        TagValue::Undefined(vec![2, 2, 0, 0])
    );
}

#[test]
fn test_encode_matches_decode() {
    let value = TagValue::Long(vec![0xDEADBEEF, 7]);
    let bytes = value.encode(&BigEndianHandler).unwrap();
    std::assert_eq!(bytes.len(), 8);

    let back = TagValue::decode(4, 2, &bytes, &BigEndianHandler).unwrap();
    std::assert_eq!(back, value);
}

#[test]
fn test_encode_slong() {
    let value = TagValue::SLong(vec![-1]);
    let bytes = value.encode(&LittleEndianHandler).unwrap();
    std::assert_eq!(bytes, vec![0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn test_value_counts() {
    std::assert_eq!(TagValue::Ascii("abc\0".to_string()).count(), 4);
    std::assert_eq!(TagValue::Short(vec![1, 2, 3]).count(), 3);
    std::assert_eq!(TagValue::Rational(vec![Rational::new(1, 2)]).count(), 1);
}

#[test]
fn test_display_formatting() {
    std::assert_eq!(TagValue::Short(vec![6]).to_string(), "6");
    std::assert_eq!(TagValue::Short(vec![6, 7]).to_string(), "[6, 7]");
    std::assert_eq!(TagValue::Ascii("Canon\0".to_string()).to_string(), "Canon");
    std::assert_eq!(
        TagValue::Rational(vec![Rational::new(72, 1)]).to_string(),
        "72 / 1"
    );
}
