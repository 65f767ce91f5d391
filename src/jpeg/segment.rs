//! JPEG segment model
//!
//! A segment is one marker-delimited unit of a JPEG stream. Most
//! segments are carried as opaque payloads; the APP1 segment is
//! additionally parsed as EXIF metadata when it carries the EXIF
//! signature, and the start-of-scan segment owns the entropy-coded
//! image data that trails its payload with no length field of its own.

use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, WriteBytesExt};
use log::debug;

use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::segment::ExifSegment;
use crate::io::seekable::SeekableReader;
use crate::jpeg::markers;
use crate::utils::tag_utils;

/// Specialized payload of a segment
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentBody {
    /// Opaque payload, reproduced verbatim
    Generic,
    /// APP1 payload parsed as EXIF metadata, re-encoded on write
    Exif(ExifSegment),
    /// Start-of-scan payload plus the raw compressed image bytes
    Scan { image_data: Vec<u8> },
}

/// One marker-delimited segment of a JPEG stream
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    marker: u8,
    data: Vec<u8>,
    body: SegmentBody,
}

impl Segment {
    /// Decodes a segment from its marker and framed payload
    ///
    /// Specialized decoders are tried per marker; one declining with
    /// `InvalidSegment` falls through to the generic opaque segment,
    /// which always succeeds. That signal never escapes this function.
    /// The scan decoder also consumes the remaining stream bytes as
    /// image data, leaving the trailing end-of-image marker for the
    /// framing loop.
    pub fn decode(
        marker: u8,
        data: Vec<u8>,
        reader: &mut dyn SeekableReader,
    ) -> ExifResult<Segment> {
        let body = match marker {
            markers::SOS => {
                let mut image_data = Vec::new();
                reader.read_to_end(&mut image_data)?;
                // The last two bytes are the end-of-image marker, not
                // image data; hand them back to the framing loop.
                image_data.truncate(image_data.len().saturating_sub(2));
                reader.seek(SeekFrom::Current(-2))?;
                debug!("Scan segment: {} payload bytes, {} image bytes", data.len(), image_data.len());
                SegmentBody::Scan { image_data }
            }
            markers::APP1 => match ExifSegment::parse(&data) {
                Ok(exif) => SegmentBody::Exif(exif),
                Err(ExifError::InvalidSegment(reason)) => {
                    debug!("APP1 payload is not EXIF ({}), keeping it opaque", reason);
                    SegmentBody::Generic
                }
                Err(e) => return Err(e),
            },
            _ => SegmentBody::Generic,
        };

        Ok(Segment { marker, data, body })
    }

    /// Wraps an EXIF segment as a new APP1 segment
    ///
    /// The payload is regenerated from the metadata model on write, so
    /// no framed bytes are stored.
    pub fn new_exif(exif: ExifSegment) -> Segment {
        Segment {
            marker: markers::APP1,
            data: Vec::new(),
            body: SegmentBody::Exif(exif),
        }
    }

    pub fn marker(&self) -> u8 {
        self.marker
    }

    /// The framed payload bytes as read from the stream
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn body(&self) -> &SegmentBody {
        &self.body
    }

    /// Whether this segment parsed as EXIF metadata
    pub fn is_exif(&self) -> bool {
        matches!(self.body, SegmentBody::Exif(_))
    }

    pub fn exif(&self) -> Option<&ExifSegment> {
        match &self.body {
            SegmentBody::Exif(exif) => Some(exif),
            _ => None,
        }
    }

    pub fn exif_mut(&mut self) -> Option<&mut ExifSegment> {
        match &mut self.body {
            SegmentBody::Exif(exif) => Some(exif),
            _ => None,
        }
    }

    /// Writes this segment back to the stream
    ///
    /// The scan segment writes its payload followed by the captured
    /// image data; the EXIF segment re-encodes its metadata model.
    pub fn write(&self, writer: &mut dyn Write) -> ExifResult<()> {
        let data = match &self.body {
            SegmentBody::Exif(exif) => exif.encode()?,
            _ => self.data.clone(),
        };
        if data.len() + 2 > u16::MAX as usize {
            return Err(ExifError::GenericError(format!(
                "segment payload of {} bytes does not fit a JPEG segment",
                data.len()
            )));
        }

        writer.write_all(&[markers::DELIM, self.marker])?;
        writer.write_u16::<BigEndian>((data.len() + 2) as u16)?;
        writer.write_all(&data)?;

        if let SegmentBody::Scan { image_data } = &self.body {
            writer.write_all(image_data)?;
        }
        Ok(())
    }

    /// Writes a one-line (or, for EXIF, recursive) description
    pub fn dump(&self, writer: &mut dyn Write) -> ExifResult<()> {
        match &self.body {
            SegmentBody::Scan { image_data } => writeln!(
                writer,
                " Scan Section:    Size: {:6} Image data size: {:6}",
                self.data.len(),
                image_data.len()
            )?,
            SegmentBody::Exif(exif) => exif.dump(writer)?,
            SegmentBody::Generic => writeln!(
                writer,
                " Section: [{:>5}] Size: {:6}",
                tag_utils::marker_name(self.marker),
                self.data.len()
            )?,
        }
        Ok(())
    }
}
