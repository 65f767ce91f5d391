//! EXIF segment codec
//!
//! An EXIF segment is the payload of a JPEG APP1 segment: the
//! `Exif\0\0` signature, a two-byte endian marker, the fixed TIFF
//! magic, and a chain of top-level directories linked by "offset of
//! next directory" fields. In practice the chain holds the primary
//! attribute directory and, optionally, the thumbnail directory.

use std::io::{Cursor, Write};

use log::{debug, info};

use crate::exif::constants::header;
use crate::exif::directory::{Directory, IfdKind};
use crate::exif::errors::{ExifError, ExifResult};
use crate::io::byte_order::ByteOrder;

/// The decoded EXIF metadata of one APP1 segment
#[derive(Debug, Clone, PartialEq)]
pub struct ExifSegment {
    byte_order: ByteOrder,
    directories: Vec<Directory>,
}

impl ExifSegment {
    /// Creates an empty EXIF segment with no directories
    ///
    /// New segments are written little-endian, the order virtually all
    /// camera firmware emits.
    pub fn new() -> Self {
        ExifSegment {
            byte_order: ByteOrder::LittleEndian,
            directories: Vec::new(),
        }
    }

    /// Parses an APP1 payload as EXIF metadata
    ///
    /// A payload without the EXIF signature fails with
    /// `InvalidSegment` so the framer can fall through to the generic
    /// segment decoder. Everything after a valid signature is required
    /// to be well-formed; violations are fatal `InvalidFile` errors.
    pub fn parse(data: &[u8]) -> ExifResult<ExifSegment> {
        if data.len() < header::EXIF_SIGNATURE.len()
            || data[..header::EXIF_SIGNATURE.len()] != header::EXIF_SIGNATURE
        {
            return Err(ExifError::InvalidSegment(
                "payload does not carry the <Exif> signature".to_string(),
            ));
        }

        let blob = &data[header::TIFF_DATA_OFFSET..];
        let mut cursor = Cursor::new(blob);

        let byte_order = ByteOrder::detect(&mut cursor)?;
        let handler = byte_order.create_handler();

        let magic = handler.read_u16(&mut cursor)?;
        if magic != header::TIFF_MAGIC {
            return Err(ExifError::InvalidFile(format!(
                "bad TIFF magic: got {:#06x}, expecting {:#06x}",
                magic,
                header::TIFF_MAGIC
            )));
        }

        let first_offset = handler.read_u32(&mut cursor)?;
        debug!(
            "EXIF segment: {} byte TIFF blob, {}, first directory at {}",
            blob.len(),
            byte_order.name(),
            first_offset
        );

        // Walk the top-level chain. The format allows at most two
        // directories here: the primary attributes and the thumbnail.
        let mut directories = Vec::new();
        let mut make: Option<String> = None;
        let mut offset = first_offset;

        while offset != 0 {
            let (directory, next_offset) = match directories.len() {
                0 => {
                    // Maker note decoding depends on the manufacturer,
                    // so pull it out of the raw entry table first.
                    make = Directory::scan_make(blob, offset, byte_order)?;
                    Directory::decode(IfdKind::Tiff, blob, offset, byte_order, make.as_deref())?
                }
                1 => Directory::decode(
                    IfdKind::Thumbnail,
                    blob,
                    offset,
                    byte_order,
                    make.as_deref(),
                )?,
                _ => {
                    return Err(ExifError::InvalidFile(
                        "more than two top-level directories in EXIF segment".to_string(),
                    ))
                }
            };
            directories.push(directory);
            offset = next_offset;
        }

        info!("Parsed EXIF segment with {} top-level directories", directories.len());
        Ok(ExifSegment { byte_order, directories })
    }

    /// Serializes this segment back to an APP1 payload
    pub fn encode(&self) -> ExifResult<Vec<u8>> {
        let handler = self.byte_order.create_handler();

        let mut ifds_data = Vec::new();
        let mut next_offset = header::FIRST_IFD_OFFSET;
        let count = self.directories.len();
        for (i, directory) in self.directories.iter().enumerate() {
            let block = directory.encode(next_offset, i + 1 == count)?;
            next_offset += block.len() as u32;
            ifds_data.extend_from_slice(&block);
        }

        let mut out = Vec::with_capacity(header::TIFF_DATA_OFFSET + 8 + ifds_data.len());
        out.extend_from_slice(&header::EXIF_SIGNATURE);
        out.extend_from_slice(&self.byte_order.marker_bytes());
        handler.write_u16(&mut out, header::TIFF_MAGIC)?;
        handler.write_u32(&mut out, header::FIRST_IFD_OFFSET)?;
        out.extend_from_slice(&ifds_data);
        Ok(out)
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// The top-level directories in chain order
    pub fn directories(&self) -> &[Directory] {
        &self.directories
    }

    /// The primary attribute directory, if present
    pub fn primary(&self) -> Option<&Directory> {
        self.directories.first()
    }

    /// Mutable primary directory, created and prepended on demand
    pub fn primary_mut(&mut self, create: bool) -> Option<&mut Directory> {
        if self.directories.is_empty() {
            if !create {
                return None;
            }
            debug!("Creating empty primary directory");
            self.directories
                .insert(0, Directory::new(IfdKind::Tiff, self.byte_order));
        }
        self.directories.first_mut()
    }

    /// The thumbnail directory, if present
    pub fn thumbnail_directory(&self) -> Option<&Directory> {
        self.directories.get(1)
    }

    /// Writes a human-readable listing of every directory
    pub fn dump(&self, writer: &mut dyn Write) -> ExifResult<()> {
        for directory in &self.directories {
            directory.dump(writer, "")?;
        }
        Ok(())
    }
}

impl Default for ExifSegment {
    fn default() -> Self {
        ExifSegment::new()
    }
}
