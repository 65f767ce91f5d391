//! EXIF/TIFF format constants
//!
//! This module defines constants used throughout the EXIF processing
//! code, making the code more readable and maintainable by replacing
//! magic numbers with descriptive names.

/// EXIF segment header constants
pub mod header {
    /// Signature at the start of an APP1 EXIF payload
    pub const EXIF_SIGNATURE: [u8; 6] = *b"Exif\0\0";

    /// Fixed TIFF magic value following the endian marker
    pub const TIFF_MAGIC: u16 = 0x2A;

    /// Offset of the TIFF blob within the APP1 payload
    pub const TIFF_DATA_OFFSET: usize = 6;

    /// Offset of the first IFD, measured from the start of the TIFF blob
    pub const FIRST_IFD_OFFSET: u32 = 8;

    /// Header expected at the start of a FujiFilm maker note block
    pub const FUJI_SIGNATURE: [u8; 8] = *b"FUJIFILM";
}

/// Value type codes as used by EXIF directory entries
///
/// This is the closed set the codec knows how to size and decode.
/// Codes outside this set (SBYTE, FLOAT, DOUBLE, the BigTIFF 8-byte
/// types) do not occur in EXIF-in-JPEG metadata and are rejected.
pub mod type_codes {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
}

/// Tags of the primary (TIFF attribute) directory
pub mod tiff_tags {
    // Pointer tags linking in the sub-directories
    pub const EXIF_IFD_POINTER: u16 = 0x8769;    // Extended EXIF attributes
    pub const GPS_IFD_POINTER: u16 = 0x8825;     // GPS attributes
    pub const INTEROP_IFD_POINTER: u16 = 0xA005; // Interoperability attributes

    // Image data structure
    pub const IMAGE_WIDTH: u16 = 0x100;          // Width of the image in pixels
    pub const IMAGE_HEIGHT: u16 = 0x101;         // Height of the image in pixels
    pub const BITS_PER_SAMPLE: u16 = 0x102;      // Bits per component
    pub const COMPRESSION: u16 = 0x103;          // Compression scheme
    pub const PHOTOMETRIC_INTERPRETATION: u16 = 0x106; // Pixel composition
    pub const ORIENTATION: u16 = 0x112;          // Image orientation
    pub const SAMPLES_PER_PIXEL: u16 = 0x115;    // Number of components
    pub const PLANAR_CONFIGURATION: u16 = 0x11C; // How components are stored
    pub const YCBCR_SUBSAMPLING: u16 = 0x212;    // Subsampling ratio of Y to C
    pub const YCBCR_POSITIONING: u16 = 0x213;    // Y and C positioning
    pub const X_RESOLUTION: u16 = 0x11A;         // Horizontal resolution
    pub const Y_RESOLUTION: u16 = 0x11B;         // Vertical resolution
    pub const RESOLUTION_UNIT: u16 = 0x128;      // Unit of X and Y resolution

    // Recording offsets
    pub const STRIP_OFFSETS: u16 = 0x111;        // Image data location
    pub const ROWS_PER_STRIP: u16 = 0x116;       // Rows per strip of data
    pub const STRIP_BYTE_COUNTS: u16 = 0x117;    // Byte counts for strips
    pub const JPEG_INTERCHANGE_FORMAT: u16 = 0x201; // Offset to thumbnail SOI
    pub const JPEG_INTERCHANGE_FORMAT_LENGTH: u16 = 0x202; // Thumbnail byte count

    // Other tags
    pub const DATE_TIME: u16 = 0x132;            // File change date and time
    pub const IMAGE_DESCRIPTION: u16 = 0x10E;    // Image title
    pub const MAKE: u16 = 0x10F;                 // Camera manufacturer
    pub const MODEL: u16 = 0x110;                // Camera model
    pub const SOFTWARE: u16 = 0x131;             // Camera software
    pub const ARTIST: u16 = 0x13B;               // Person who created the image
    pub const COPYRIGHT: u16 = 0x8298;           // Copyright notice
}

/// Tags of the extended EXIF attribute directory
pub mod exif_tags {
    pub const EXIF_VERSION: u16 = 0x9000;        // Exif version
    pub const FLASHPIX_VERSION: u16 = 0xA000;    // Supported Flashpix version
    pub const COLOR_SPACE: u16 = 0xA001;         // Color space information
    pub const PIXEL_X_DIMENSION: u16 = 0xA002;   // Valid image width
    pub const PIXEL_Y_DIMENSION: u16 = 0xA003;   // Valid image height
    pub const MAKER_NOTE: u16 = 0x927C;          // Manufacturer notes
    pub const USER_COMMENT: u16 = 0x9286;        // User comments
    pub const DATE_TIME_ORIGINAL: u16 = 0x9003;  // Date of original data generation
    pub const DATE_TIME_DIGITIZED: u16 = 0x9004; // Date of digital data generation
    pub const EXPOSURE_TIME: u16 = 0x829A;       // Exposure time
    pub const F_NUMBER: u16 = 0x829D;            // F number
    pub const ISO_SPEED_RATINGS: u16 = 0x8827;   // ISO speed rating
    pub const FOCAL_LENGTH: u16 = 0x920A;        // Lens focal length
    pub const FLASH: u16 = 0x9209;               // Flash status
    pub const IMAGE_UNIQUE_ID: u16 = 0xA420;     // Unique image ID
}

/// Tags of the GPS attribute directory
pub mod gps_tags {
    pub const VERSION_ID: u16 = 0x0;     // GPS tag version
    pub const LATITUDE_REF: u16 = 0x1;   // North or South latitude
    pub const LATITUDE: u16 = 0x2;       // Latitude as deg/min/sec rationals
    pub const LONGITUDE_REF: u16 = 0x3;  // East or West longitude
    pub const LONGITUDE: u16 = 0x4;      // Longitude as deg/min/sec rationals
    pub const ALTITUDE_REF: u16 = 0x5;   // Altitude reference
    pub const ALTITUDE: u16 = 0x6;       // Altitude
}
