//! JPEG marker constants
//!
//! Marker codes for the segments this tool cares about. The full
//! marker space is larger, but unrecognized segments are carried as
//! opaque payloads so nothing is lost by not naming them here.

/// Every marker is preceded by this delimiter byte
pub const DELIM: u8 = 0xFF;

/// Start of image
pub const SOI: u8 = 0xD8;
/// End of image
pub const EOI: u8 = 0xD9;
/// Start of scan; entropy-coded image data follows its payload
pub const SOS: u8 = 0xDA;

/// Baseline DCT frame header
pub const SOF0: u8 = 0xC0;
/// Progressive DCT frame header
pub const SOF2: u8 = 0xC2;
/// Huffman table definition
pub const DHT: u8 = 0xC4;
/// Quantization table definition
pub const DQT: u8 = 0xDB;
/// Restart interval definition
pub const DRI: u8 = 0xDD;

/// First application-reserved marker (JFIF)
pub const APP0: u8 = 0xE0;
/// Second application-reserved marker (EXIF, XMP)
pub const APP1: u8 = 0xE1;
/// Last application-reserved marker
pub const APP15: u8 = 0xEF;
/// Comment
pub const COM: u8 = 0xFE;

/// The two-byte start-of-image sequence opening every JPEG stream
pub const SOI_MARKER: [u8; 2] = [DELIM, SOI];
/// The two-byte end-of-image sequence closing every JPEG stream
pub const EOI_MARKER: [u8; 2] = [DELIM, EOI];

/// Whether a marker is in the application-reserved range (APP0..APP15)
pub fn is_application(marker: u8) -> bool {
    (APP0..=APP15).contains(&marker)
}

/// Whether a marker is one a JPEG decoder needs to reconstruct pixels
///
/// This is the keep-set consulted by paranoid metadata stripping:
/// frame and table definitions, the scan itself, and the JFIF header.
pub fn is_structural(marker: u8) -> bool {
    matches!(marker, SOF0 | SOF2 | DHT | DQT | DRI | SOS | APP0)
}
