//! Byte order handling for TIFF data embedded in JPEG files
//!
//! This module implements the Strategy pattern for handling the two
//! byte orders a TIFF blob may use (little-endian "II" vs big-endian
//! "MM"). Every multi-byte read or write inside an EXIF segment goes
//! through a `ByteOrderHandler` so the codec itself stays agnostic.

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Result, Write};

use crate::exif::errors::{ExifError, ExifResult};
use crate::io::seekable::SeekableReader;

/// Represents the byte order of a TIFF blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Detects the byte order from the two-byte endian marker
    ///
    /// The marker is "II" (0x4949) for little-endian data or "MM"
    /// (0x4D4D) for big-endian data. Anything else is a malformed
    /// file, not a segment that another decoder might claim.
    pub fn detect(reader: &mut dyn SeekableReader) -> ExifResult<Self> {
        let marker = reader.read_u16::<LittleEndian>()?;
        match marker {
            0x4949 => Ok(ByteOrder::LittleEndian), // "II" (Intel)
            0x4D4D => Ok(ByteOrder::BigEndian),    // "MM" (Motorola)
            _ => Err(ExifError::InvalidFile(format!(
                "bad TIFF endian marker {:#06x}, expecting <II> or <MM>",
                marker
            ))),
        }
    }

    /// Returns the two on-wire marker bytes for this byte order
    pub fn marker_bytes(&self) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => [0x49, 0x49], // "II"
            ByteOrder::BigEndian => [0x4D, 0x4D],    // "MM"
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Trait for byte order handling strategies
///
/// The read side pulls values out of a seekable source, the write side
/// appends values to any `Write` sink. Both are needed because the
/// codec re-serializes files in whichever order they were read in.
pub trait ByteOrderHandler: Send + Sync {
    /// Read a u16 value
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16>;

    /// Read a u32 value
    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32>;

    /// Read an i32 value
    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32>;

    /// Read a rational value (two u32 values as numerator/denominator)
    fn read_rational(&self, reader: &mut dyn SeekableReader) -> Result<(u32, u32)>;

    /// Read a signed rational value (two i32 values as numerator/denominator)
    fn read_srational(&self, reader: &mut dyn SeekableReader) -> Result<(i32, i32)>;

    /// Write a u16 value
    fn write_u16(&self, writer: &mut dyn Write, value: u16) -> Result<()>;

    /// Write a u32 value
    fn write_u32(&self, writer: &mut dyn Write, value: u32) -> Result<()>;

    /// Write an i32 value
    fn write_i32(&self, writer: &mut dyn Write, value: i32) -> Result<()>;

    /// Returns the four bytes of a u32 in this byte order
    ///
    /// Used for the 4-byte value/offset slot of a directory entry,
    /// which is built up as raw bytes before being written.
    fn u32_bytes(&self, value: u32) -> [u8; 4];
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        reader.read_u16::<LittleEndian>()
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        reader.read_u32::<LittleEndian>()
    }

    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32> {
        reader.read_i32::<LittleEndian>()
    }

    fn read_rational(&self, reader: &mut dyn SeekableReader) -> Result<(u32, u32)> {
        let numerator = reader.read_u32::<LittleEndian>()?;
        let denominator = reader.read_u32::<LittleEndian>()?;
        Ok((numerator, denominator))
    }

    fn read_srational(&self, reader: &mut dyn SeekableReader) -> Result<(i32, i32)> {
        let numerator = reader.read_i32::<LittleEndian>()?;
        let denominator = reader.read_i32::<LittleEndian>()?;
        Ok((numerator, denominator))
    }

    fn write_u16(&self, writer: &mut dyn Write, value: u16) -> Result<()> {
        writer.write_u16::<LittleEndian>(value)
    }

    fn write_u32(&self, writer: &mut dyn Write, value: u32) -> Result<()> {
        writer.write_u32::<LittleEndian>(value)
    }

    fn write_i32(&self, writer: &mut dyn Write, value: i32) -> Result<()> {
        writer.write_i32::<LittleEndian>(value)
    }

    fn u32_bytes(&self, value: u32) -> [u8; 4] {
        value.to_le_bytes()
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        reader.read_u16::<BigEndian>()
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        reader.read_u32::<BigEndian>()
    }

    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32> {
        reader.read_i32::<BigEndian>()
    }

    fn read_rational(&self, reader: &mut dyn SeekableReader) -> Result<(u32, u32)> {
        let numerator = reader.read_u32::<BigEndian>()?;
        let denominator = reader.read_u32::<BigEndian>()?;
        Ok((numerator, denominator))
    }

    fn read_srational(&self, reader: &mut dyn SeekableReader) -> Result<(i32, i32)> {
        let numerator = reader.read_i32::<BigEndian>()?;
        let denominator = reader.read_i32::<BigEndian>()?;
        Ok((numerator, denominator))
    }

    fn write_u16(&self, writer: &mut dyn Write, value: u16) -> Result<()> {
        writer.write_u16::<BigEndian>(value)
    }

    fn write_u32(&self, writer: &mut dyn Write, value: u32) -> Result<()> {
        writer.write_u32::<BigEndian>(value)
    }

    fn write_i32(&self, writer: &mut dyn Write, value: i32) -> Result<()> {
        writer.write_i32::<BigEndian>(value)
    }

    fn u32_bytes(&self, value: u32) -> [u8; 4] {
        value.to_be_bytes()
    }
}
