//! EXIF tag utilities
//!
//! Display-name lookups for tags and JPEG markers, backed by the
//! exif_tags.toml definition file, plus the name-to-tag resolution and
//! textual value parsing used by the CLI layer.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::exif::constants::{exif_tags, gps_tags, tiff_tags, type_codes};
use crate::exif::directory::IfdKind;
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::value::{Rational, SRational, TagValue};

lazy_static! {
    // Parse the TOML definition file at startup
    static ref EXIF_DEFINITIONS: TagDefinitions = {
        let content = include_str!("../../exif_tags.toml");
        TagDefinitions::from_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse EXIF tag definitions: {}", e);
            TagDefinitions::default()
        })
    };
}

/// Container for tag and marker display names
#[derive(Debug, Default)]
pub struct TagDefinitions {
    // Maps JPEG marker codes to names
    pub marker_names: HashMap<u8, String>,
    // Maps tag numbers to names, one table per directory dictionary
    pub tiff_names: HashMap<u16, String>,
    pub exif_names: HashMap<u16, String>,
    pub gps_names: HashMap<u16, String>,
    pub interop_names: HashMap<u16, String>,
    pub canon_names: HashMap<u16, String>,
    pub fuji_names: HashMap<u16, String>,
}

impl TagDefinitions {
    /// Parses tag definitions from a TOML string
    pub fn from_str(content: &str) -> ExifResult<Self> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| ExifError::GenericError(format!("Failed to parse TOML: {}", e)))?;

        let mut defs = TagDefinitions::default();

        if let Some(table) = toml_value.get("markers").and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let (Ok(id), Some(name)) = (k.parse::<u8>(), v.as_str()) {
                    defs.marker_names.insert(id, name.to_string());
                }
            }
        }

        let tag_tables: [(&str, &mut HashMap<u16, String>); 6] = [
            ("tiff_tags", &mut defs.tiff_names),
            ("exif_tags", &mut defs.exif_names),
            ("gps_tags", &mut defs.gps_names),
            ("interop_tags", &mut defs.interop_names),
            ("canon_tags", &mut defs.canon_names),
            ("fuji_tags", &mut defs.fuji_names),
        ];
        for (key, names) in tag_tables {
            if let Some(table) = toml_value.get(key).and_then(|v| v.as_table()) {
                for (k, v) in table {
                    if let (Ok(id), Some(name)) = (k.parse::<u16>(), v.as_str()) {
                        names.insert(id, name.to_string());
                    }
                }
            }
        }

        Ok(defs)
    }
}

/// Returns the display name of a JPEG marker
pub fn marker_name(marker: u8) -> String {
    EXIF_DEFINITIONS
        .marker_names
        .get(&marker)
        .cloned()
        .unwrap_or_else(|| format!("0x{:02X}", marker))
}

/// Returns the display name of a tag within a directory variant
///
/// Tags missing from the dictionary are shown as hex.
pub fn tag_name(kind: IfdKind, tag: u16) -> String {
    let table = match kind {
        IfdKind::Tiff | IfdKind::Thumbnail => &EXIF_DEFINITIONS.tiff_names,
        IfdKind::Exif => &EXIF_DEFINITIONS.exif_names,
        IfdKind::Gps => &EXIF_DEFINITIONS.gps_names,
        IfdKind::Interop => &EXIF_DEFINITIONS.interop_names,
        IfdKind::CanonNote => &EXIF_DEFINITIONS.canon_names,
        IfdKind::FujiNote => &EXIF_DEFINITIONS.fuji_names,
    };
    table
        .get(&tag)
        .cloned()
        .unwrap_or_else(|| format!("0x{:04x}", tag))
}

/// Which directory a named tag lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagScope {
    /// The primary attribute directory
    Primary,
    /// The extended EXIF directory under the EXIF pointer tag
    Extended,
    /// The GPS directory under the GPS pointer tag
    Gps,
}

impl TagScope {
    /// Directory variant holding this scope's dictionary
    pub fn kind(&self) -> IfdKind {
        match self {
            TagScope::Primary => IfdKind::Tiff,
            TagScope::Extended => IfdKind::Exif,
            TagScope::Gps => IfdKind::Gps,
        }
    }
}

/// Resolves a tag name to its scope and number
///
/// Accepts the well-known attribute names plus bare numeric forms
/// ("0x010f" or "271"), which address the primary directory.
pub fn find_tag(name: &str) -> Option<(TagScope, u16)> {
    if let Some(hex) = name.strip_prefix("0x").or_else(|| name.strip_prefix("0X")) {
        if let Ok(tag) = u16::from_str_radix(hex, 16) {
            return Some((TagScope::Primary, tag));
        }
    }
    if let Ok(tag) = name.parse::<u16>() {
        return Some((TagScope::Primary, tag));
    }

    let found = match name {
        // Primary directory attributes
        "ImageWidth" => (TagScope::Primary, tiff_tags::IMAGE_WIDTH),
        "ImageHeight" => (TagScope::Primary, tiff_tags::IMAGE_HEIGHT),
        "BitsPerSample" => (TagScope::Primary, tiff_tags::BITS_PER_SAMPLE),
        "Compression" => (TagScope::Primary, tiff_tags::COMPRESSION),
        "PhotometricInterpretation" => (TagScope::Primary, tiff_tags::PHOTOMETRIC_INTERPRETATION),
        "Orientation" => (TagScope::Primary, tiff_tags::ORIENTATION),
        "SamplesPerPixel" => (TagScope::Primary, tiff_tags::SAMPLES_PER_PIXEL),
        "PlanarConfiguration" => (TagScope::Primary, tiff_tags::PLANAR_CONFIGURATION),
        "YCbCrSubSampling" => (TagScope::Primary, tiff_tags::YCBCR_SUBSAMPLING),
        "YCbCrPositioning" => (TagScope::Primary, tiff_tags::YCBCR_POSITIONING),
        "XResolution" => (TagScope::Primary, tiff_tags::X_RESOLUTION),
        "YResolution" => (TagScope::Primary, tiff_tags::Y_RESOLUTION),
        "ResolutionUnit" => (TagScope::Primary, tiff_tags::RESOLUTION_UNIT),
        "StripOffsets" => (TagScope::Primary, tiff_tags::STRIP_OFFSETS),
        "RowsPerStrip" => (TagScope::Primary, tiff_tags::ROWS_PER_STRIP),
        "StripByteCounts" => (TagScope::Primary, tiff_tags::STRIP_BYTE_COUNTS),
        "JPEGInterchangeFormat" => (TagScope::Primary, tiff_tags::JPEG_INTERCHANGE_FORMAT),
        "JPEGInterchangeFormatLength" => {
            (TagScope::Primary, tiff_tags::JPEG_INTERCHANGE_FORMAT_LENGTH)
        }
        "DateTime" => (TagScope::Primary, tiff_tags::DATE_TIME),
        "ImageDescription" => (TagScope::Primary, tiff_tags::IMAGE_DESCRIPTION),
        "Make" => (TagScope::Primary, tiff_tags::MAKE),
        "Model" => (TagScope::Primary, tiff_tags::MODEL),
        "Software" => (TagScope::Primary, tiff_tags::SOFTWARE),
        "Artist" => (TagScope::Primary, tiff_tags::ARTIST),
        "Copyright" => (TagScope::Primary, tiff_tags::COPYRIGHT),

        // Extended EXIF attributes
        "ExifVersion" => (TagScope::Extended, exif_tags::EXIF_VERSION),
        "FlashpixVersion" => (TagScope::Extended, exif_tags::FLASHPIX_VERSION),
        "ColorSpace" => (TagScope::Extended, exif_tags::COLOR_SPACE),
        "PixelXDimension" => (TagScope::Extended, exif_tags::PIXEL_X_DIMENSION),
        "PixelYDimension" => (TagScope::Extended, exif_tags::PIXEL_Y_DIMENSION),
        "UserComment" => (TagScope::Extended, exif_tags::USER_COMMENT),
        "DateTimeOriginal" => (TagScope::Extended, exif_tags::DATE_TIME_ORIGINAL),
        "DateTimeDigitized" => (TagScope::Extended, exif_tags::DATE_TIME_DIGITIZED),
        "ExposureTime" => (TagScope::Extended, exif_tags::EXPOSURE_TIME),
        "FNumber" => (TagScope::Extended, exif_tags::F_NUMBER),
        "ISOSpeedRatings" => (TagScope::Extended, exif_tags::ISO_SPEED_RATINGS),
        "FocalLength" => (TagScope::Extended, exif_tags::FOCAL_LENGTH),
        "Flash" => (TagScope::Extended, exif_tags::FLASH),
        "ImageUniqueID" => (TagScope::Extended, exif_tags::IMAGE_UNIQUE_ID),

        // GPS attributes
        "GPSVersionID" => (TagScope::Gps, gps_tags::VERSION_ID),
        "GPSLatitudeRef" => (TagScope::Gps, gps_tags::LATITUDE_REF),
        "GPSLatitude" => (TagScope::Gps, gps_tags::LATITUDE),
        "GPSLongitudeRef" => (TagScope::Gps, gps_tags::LONGITUDE_REF),
        "GPSLongitude" => (TagScope::Gps, gps_tags::LONGITUDE),
        "GPSAltitudeRef" => (TagScope::Gps, gps_tags::ALTITUDE_REF),
        "GPSAltitude" => (TagScope::Gps, gps_tags::ALTITUDE),

        _ => return None,
    };
    Some(found)
}

/// Parses a textual value into a TagValue of the given wire type
///
/// Multi-component values are comma-separated; rationals accept
/// "num/den" pairs or bare integers.
pub fn parse_tag_value(type_code: u16, text: &str) -> ExifResult<TagValue> {
    fn parse_list<T, F>(text: &str, parse: F) -> ExifResult<Vec<T>>
    where
        F: Fn(&str) -> ExifResult<T>,
    {
        text.split(',').map(|part| parse(part.trim())).collect()
    }

    fn parse_int<T: std::str::FromStr>(part: &str) -> ExifResult<T> {
        part.parse::<T>()
            .map_err(|_| ExifError::GenericError(format!("invalid numeric value <{}>", part)))
    }

    fn parse_rational(part: &str) -> ExifResult<Rational> {
        match part.split_once('/') {
            Some((num, den)) => Ok(Rational::new(parse_int(num.trim())?, parse_int(den.trim())?)),
            None => Ok(Rational::new(parse_int(part)?, 1)),
        }
    }

    fn parse_srational(part: &str) -> ExifResult<SRational> {
        match part.split_once('/') {
            Some((num, den)) => Ok(SRational::new(parse_int(num.trim())?, parse_int(den.trim())?)),
            None => Ok(SRational::new(parse_int(part)?, 1)),
        }
    }

    match type_code {
        type_codes::ASCII => Ok(TagValue::Ascii(text.to_string())),
        type_codes::BYTE => Ok(TagValue::Byte(parse_list(text, parse_int::<u8>)?)),
        type_codes::UNDEFINED => Ok(TagValue::Undefined(parse_list(text, parse_int::<u8>)?)),
        type_codes::SHORT => Ok(TagValue::Short(parse_list(text, parse_int::<u16>)?)),
        type_codes::LONG => Ok(TagValue::Long(parse_list(text, parse_int::<u32>)?)),
        type_codes::SLONG => Ok(TagValue::SLong(parse_list(text, parse_int::<i32>)?)),
        type_codes::RATIONAL => Ok(TagValue::Rational(parse_list(text, parse_rational)?)),
        type_codes::SRATIONAL => Ok(TagValue::SRational(parse_list(text, parse_srational)?)),
        other => Err(ExifError::UnsupportedType(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_tag_by_name_and_number() {
        assert_eq!(find_tag("Make"), Some((TagScope::Primary, 0x10F)));
        assert_eq!(find_tag("DateTimeOriginal"), Some((TagScope::Extended, 0x9003)));
        assert_eq!(find_tag("GPSLatitude"), Some((TagScope::Gps, 0x2)));
        assert_eq!(find_tag("0x010f"), Some((TagScope::Primary, 0x10F)));
        assert_eq!(find_tag("271"), Some((TagScope::Primary, 0x10F)));
        assert_eq!(find_tag("NoSuchTag"), None);
    }

    #[test]
    fn test_every_resolvable_name_has_a_dictionary_type_or_defaults() {
        // Every name the resolver knows must land in a scope whose
        // dictionary the directory model can serve
        for name in ["Make", "Orientation", "XResolution", "GPSLatitude", "GPSLatitudeRef"] {
            let (scope, tag) = find_tag(name).unwrap();
            assert!(scope.kind().forced_type(tag).is_some(), "{} lost its type", name);
        }
    }

    #[test]
    fn test_parse_tag_value_forms() {
        assert_eq!(
            parse_tag_value(2, "hello").unwrap(),
            TagValue::Ascii("hello".to_string())
        );
        assert_eq!(parse_tag_value(3, "1, 2").unwrap(), TagValue::Short(vec![1, 2]));
        assert_eq!(
            parse_tag_value(5, "72/1").unwrap(),
            TagValue::Rational(vec![Rational::new(72, 1)])
        );
        assert_eq!(
            parse_tag_value(5, "7").unwrap(),
            TagValue::Rational(vec![Rational::new(7, 1)])
        );
        assert!(parse_tag_value(3, "many").is_err());
        assert!(parse_tag_value(42, "x").is_err());
    }

    #[test]
    fn test_display_names_resolve() {
        assert_eq!(tag_name(IfdKind::Tiff, 0x10F), "Camera make");
        assert_eq!(tag_name(IfdKind::Gps, 0x2), "Latitude");
        assert_eq!(tag_name(IfdKind::Tiff, 0x9999), "0x9999");
        assert_eq!(marker_name(0xDB), "DQT");
        assert_eq!(marker_name(0x02), "0x02");
    }
}
