//! JPEG file container
//!
//! `JpegFile` owns the ordered segment list between the start-of-image
//! and end-of-image markers. It frames the byte stream into segments
//! on load, reassembles it byte-for-byte on write, and layers the
//! EXIF/GPS convenience operations and metadata stripping on top of
//! the segment list.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, info};

use crate::exif::constants::{gps_tags, tiff_tags, type_codes};
use crate::exif::directory::{Directory, IfdKind};
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::segment::ExifSegment;
use crate::exif::value::{Rational, TagValue};
use crate::io::seekable::SeekableReader;
use crate::jpeg::markers;
use crate::jpeg::segment::Segment;
use crate::utils::{geo_utils, tag_utils};

/// Which segments metadata stripping removes
///
/// The removal list is caller-configurable; the default removes the
/// application-reserved segments that carry metadata (APP1 through
/// APP15) and comments, keeping the JFIF APP0 header. Paranoid mode
/// additionally drops every segment whose marker is not in the
/// structural keep-set a decoder needs.
#[derive(Debug, Clone)]
pub struct StripPolicy {
    /// Markers to remove outright
    pub remove: Vec<u8>,
    /// Also remove segments whose purpose is unrecognized
    pub paranoid: bool,
}

impl StripPolicy {
    pub fn new(remove: Vec<u8>, paranoid: bool) -> Self {
        StripPolicy { remove, paranoid }
    }

    /// The default policy with paranoid mode switched on
    pub fn paranoid() -> Self {
        StripPolicy { paranoid: true, ..StripPolicy::default() }
    }
}

impl Default for StripPolicy {
    fn default() -> Self {
        let mut remove: Vec<u8> = (markers::APP1..=markers::APP15).collect();
        remove.push(markers::COM);
        StripPolicy { remove, paranoid: false }
    }
}

/// A JPEG file as an ordered list of segments
#[derive(Debug, Clone)]
pub struct JpegFile {
    /// Display name of the byte source, used by dump and error text
    name: String,
    segments: Vec<Segment>,
}

impl JpegFile {
    /// Loads a JPEG file from the given path
    pub fn from_file(path: &str) -> ExifResult<JpegFile> {
        info!("Loading JPEG file: {}", path);
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(64 * 1024, file);
        Self::from_reader(&mut reader, path)
    }

    /// Loads a JPEG file from an in-memory buffer
    pub fn from_bytes(data: &[u8]) -> ExifResult<JpegFile> {
        let mut cursor = Cursor::new(data.to_vec());
        Self::from_reader(&mut cursor, "from buffer")
    }

    /// Loads a JPEG file from any seekable byte source
    ///
    /// The stream must open with the start-of-image marker; capture
    /// ends at the first end-of-image marker. Any framing violation is
    /// a fatal `InvalidFile` and no partial object is returned.
    pub fn from_reader(reader: &mut dyn SeekableReader, name: &str) -> ExifResult<JpegFile> {
        let mut soi = [0u8; 2];
        reader.read_exact(&mut soi)?;
        if soi != markers::SOI_MARKER {
            return Err(ExifError::InvalidFile(format!(
                "bad start-of-image marker: got {:02x?}, expecting {:02x?}",
                soi,
                markers::SOI_MARKER
            )));
        }

        let mut segments = Vec::new();
        loop {
            let delim = reader.read_u8()?;
            let marker = reader.read_u8()?;
            if delim != markers::DELIM {
                return Err(ExifError::InvalidFile(format!(
                    "expecting segment delimiter 0xff, got {:#04x}",
                    delim
                )));
            }
            if marker == markers::EOI {
                break;
            }

            // The declared length includes the length field itself
            let size = reader.read_u16::<BigEndian>()? as usize;
            if size < 2 {
                return Err(ExifError::InvalidFile(format!(
                    "segment {:#04x} declares impossible length {}",
                    marker, size
                )));
            }
            let mut data = vec![0u8; size - 2];
            reader.read_exact(&mut data)?;
            debug!("Read segment {:#04x} with {} byte payload", marker, data.len());

            segments.push(Segment::decode(marker, data, reader)?);
        }

        info!("Parsed {} segments from {}", segments.len(), name);
        Ok(JpegFile { name: name.to_string(), segments })
    }

    /// Writes the file out to any byte sink
    pub fn write_to(&self, writer: &mut dyn Write) -> ExifResult<()> {
        writer.write_all(&markers::SOI_MARKER)?;
        for segment in &self.segments {
            segment.write(writer)?;
        }
        writer.write_all(&markers::EOI_MARKER)?;
        Ok(())
    }

    /// Serializes the file to an in-memory buffer
    pub fn write_bytes(&self) -> ExifResult<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Writes the file out to the given path
    pub fn write_file(&self, path: &str) -> ExifResult<()> {
        info!("Writing JPEG file: {}", path);
        let file = File::create(path)?;
        let mut writer = BufWriter::with_capacity(64 * 1024, file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The segments in stream order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The EXIF segment, if the file has one
    pub fn exif(&self) -> Option<&ExifSegment> {
        self.segments.iter().find_map(|s| s.exif())
    }

    /// Mutable EXIF segment, created on demand
    ///
    /// A newly created segment is inserted at the front of the segment
    /// list. Conforming readers accept APP1 anywhere, and front
    /// insertion is what keeps re-encoded files matching the files
    /// this tool has always produced.
    pub fn exif_mut(&mut self, create: bool) -> Option<&mut ExifSegment> {
        match self.segments.iter().position(|s| s.is_exif()) {
            Some(idx) => self.segments[idx].exif_mut(),
            None if create => {
                info!("Creating new EXIF segment");
                self.segments.insert(0, Segment::new_exif(ExifSegment::new()));
                self.segments[0].exif_mut()
            }
            None => None,
        }
    }

    /// Replaces this file's EXIF segment with another file's
    ///
    /// Fails with `NoSection` when the source has no EXIF segment. A
    /// missing destination segment is created at the front, the same
    /// placement rule as `exif_mut`.
    pub fn import_exif(&mut self, source: &JpegFile) -> ExifResult<()> {
        let imported = source.exif().cloned().ok_or_else(|| {
            ExifError::NoSection(format!("file {} doesn't have an EXIF segment", source.name))
        })?;

        info!("Importing EXIF segment from {}", source.name);
        match self.segments.iter().position(|s| s.is_exif()) {
            Some(idx) => self.segments[idx] = Segment::new_exif(imported),
            None => self.segments.insert(0, Segment::new_exif(imported)),
        }
        Ok(())
    }

    /// Removes metadata segments according to the given policy
    ///
    /// Returns how many segments were dropped. Best-effort: stripping
    /// never fails, it only removes what the policy names.
    pub fn strip_metadata(&mut self, policy: &StripPolicy) -> usize {
        let before = self.segments.len();
        self.segments.retain(|segment| {
            let marker = segment.marker();
            let drop = policy.remove.contains(&marker)
                || (policy.paranoid && !markers::is_structural(marker));
            if drop {
                debug!("Stripping segment {}", tag_utils::marker_name(marker));
            }
            !drop
        });
        before - self.segments.len()
    }

    /// Writes a human-readable structural dump of the file
    pub fn dump(&self, writer: &mut dyn Write) -> ExifResult<()> {
        writeln!(writer, "<Dump of JPEG {}>", self.name)?;
        for segment in &self.segments {
            segment.dump(writer)?;
        }
        Ok(())
    }

    /// Reads a tag by name or numeric form
    ///
    /// Returns `Ok(None)` when the tag, or any directory on the way to
    /// it, is absent. Unknown names fail.
    pub fn get_tag(&self, name: &str) -> ExifResult<Option<TagValue>> {
        let (scope, tag) = tag_utils::find_tag(name).ok_or_else(|| {
            ExifError::UnsupportedTag(name.to_string())
        })?;

        let primary = match self.exif().and_then(|exif| exif.primary()) {
            Some(primary) => primary,
            None => return Ok(None),
        };
        let directory = match scope {
            tag_utils::TagScope::Primary => Some(primary),
            tag_utils::TagScope::Extended => primary.subdirectory(tiff_tags::EXIF_IFD_POINTER),
            tag_utils::TagScope::Gps => primary.subdirectory(tiff_tags::GPS_IFD_POINTER),
        };
        Ok(directory.and_then(|d| d.get(tag)))
    }

    /// Sets a tag by name, parsing the value per the tag dictionary
    ///
    /// Creates the EXIF segment, primary directory and the scope's
    /// sub-directory as needed. Tags without a dictionary type are
    /// treated as ASCII.
    pub fn set_tag(&mut self, name: &str, text: &str) -> ExifResult<()> {
        let (scope, tag) = tag_utils::find_tag(name).ok_or_else(|| {
            ExifError::UnsupportedTag(name.to_string())
        })?;
        let type_code = scope.kind().forced_type(tag).unwrap_or(type_codes::ASCII);
        let value = tag_utils::parse_tag_value(type_code, text)?;

        let directory = self.scope_directory_mut(scope)?;
        directory.set(tag, Some(value));
        Ok(())
    }

    /// Removes a tag by name
    ///
    /// Removing a tag whose directory does not exist is a no-op.
    pub fn delete_tag(&mut self, name: &str) -> ExifResult<()> {
        let (scope, tag) = tag_utils::find_tag(name).ok_or_else(|| {
            ExifError::UnsupportedTag(name.to_string())
        })?;

        let primary = match self.exif_mut(false).and_then(|exif| exif.primary_mut(false)) {
            Some(primary) => primary,
            None => return Ok(()),
        };
        let directory = match scope {
            tag_utils::TagScope::Primary => Some(primary),
            tag_utils::TagScope::Extended => {
                primary.subdirectory_mut(tiff_tags::EXIF_IFD_POINTER)
            }
            tag_utils::TagScope::Gps => primary.subdirectory_mut(tiff_tags::GPS_IFD_POINTER),
        };
        if let Some(directory) = directory {
            directory.set(tag, None);
        }
        Ok(())
    }

    /// Mutable directory for a tag scope, created on demand
    fn scope_directory_mut(&mut self, scope: tag_utils::TagScope) -> ExifResult<&mut Directory> {
        let primary = self
            .exif_mut(true)
            .and_then(|exif| exif.primary_mut(true))
            .ok_or_else(|| {
                ExifError::GenericError("failed to create a primary directory".to_string())
            })?;

        match scope {
            tag_utils::TagScope::Primary => Ok(primary),
            tag_utils::TagScope::Extended => {
                primary.ensure_subdirectory(tiff_tags::EXIF_IFD_POINTER, IfdKind::Exif)
            }
            tag_utils::TagScope::Gps => {
                if primary.has(tiff_tags::GPS_IFD_POINTER) {
                    primary.subdirectory_mut(tiff_tags::GPS_IFD_POINTER).ok_or_else(|| {
                        ExifError::GenericError(
                            "GPS pointer tag does not hold a directory".to_string(),
                        )
                    })
                } else {
                    primary.new_gps()
                }
            }
        }
    }

    /// Reads the GPS location as signed decimal degrees
    ///
    /// Fails with `NoSection` when the file has no EXIF segment or no
    /// GPS directory; that is an expected, recoverable condition for
    /// callers probing whether a photo is geotagged.
    pub fn get_geo(&self) -> ExifResult<(f64, f64)> {
        let gps = self
            .exif()
            .and_then(|exif| exif.primary())
            .and_then(|primary| primary.subdirectory(tiff_tags::GPS_IFD_POINTER))
            .ok_or_else(|| {
                ExifError::NoSection(format!("file {} doesn't have a GPS section", self.name))
            })?;

        let latitude = match gps.get(gps_tags::LATITUDE) {
            Some(TagValue::Rational(v)) if v.len() == 3 => v,
            _ => {
                return Err(ExifError::NoSection(
                    "GPS section doesn't carry a latitude".to_string(),
                ))
            }
        };
        let longitude = match gps.get(gps_tags::LONGITUDE) {
            Some(TagValue::Rational(v)) if v.len() == 3 => v,
            _ => {
                return Err(ExifError::NoSection(
                    "GPS section doesn't carry a longitude".to_string(),
                ))
            }
        };

        let mut lat = geo_utils::dms_to_degrees(&latitude[0], &latitude[1], &latitude[2]);
        let lat_ref = gps.get(gps_tags::LATITUDE_REF);
        if lat_ref.as_ref().and_then(|v| v.as_str()) == Some("S") {
            lat = -lat;
        }

        let mut lng = geo_utils::dms_to_degrees(&longitude[0], &longitude[1], &longitude[2]);
        let lng_ref = gps.get(gps_tags::LONGITUDE_REF);
        if lng_ref.as_ref().and_then(|v| v.as_str()) == Some("W") {
            lng = -lng;
        }

        Ok((lat, lng))
    }

    /// Sets the GPS location, creating the EXIF segment, primary
    /// directory and GPS directory as needed
    pub fn set_geo(&mut self, lat: f64, lng: f64) -> ExifResult<()> {
        info!("Setting GPS location to ({}, {})", lat, lng);
        let gps = self.scope_directory_mut(tag_utils::TagScope::Gps)?;

        let (sign, deg, min, sec) = geo_utils::degrees_to_dms(lat);
        let lat_ref = if sign < 0 { "S" } else { "N" };
        gps.set(gps_tags::LATITUDE_REF, Some(TagValue::Ascii(lat_ref.to_string())));
        gps.set(
            gps_tags::LATITUDE,
            Some(TagValue::Rational(vec![
                Rational::new(deg, 1),
                Rational::new(min, 1),
                Rational::new(sec, geo_utils::SECONDS_DENOMINATOR),
            ])),
        );

        let (sign, deg, min, sec) = geo_utils::degrees_to_dms(lng);
        let lng_ref = if sign < 0 { "W" } else { "E" };
        gps.set(gps_tags::LONGITUDE_REF, Some(TagValue::Ascii(lng_ref.to_string())));
        gps.set(
            gps_tags::LONGITUDE,
            Some(TagValue::Rational(vec![
                Rational::new(deg, 1),
                Rational::new(min, 1),
                Rational::new(sec, geo_utils::SECONDS_DENOMINATOR),
            ])),
        );

        Ok(())
    }
}
