//! Image File Directory (IFD) structures and codec
//!
//! This module implements the core IFD model: an ordered collection of
//! tag entries with a per-variant tag dictionary, decoded from and
//! encoded to the TIFF blob inside a JPEG APP1 segment. Directories
//! recurse: an entry's value may itself be a nested directory (the
//! extended EXIF, GPS and interoperability sub-IFDs, and the vendor
//! maker notes with their divergent framing rules).

use std::collections::HashMap;
use std::io::{Cursor, Write};

use log::{debug, trace};

use crate::exif::constants::{gps_tags, header, tiff_tags, type_codes};
use crate::exif::entry::{self, DirectoryEntry, ENTRY_SIZE};
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::value::TagValue;
use crate::io::byte_order::ByteOrder;
use crate::utils::{string_utils, tag_utils};

/// The IFD variants this codec knows about
///
/// Each variant carries its own tag dictionary (display names, forced
/// types) and its own table of embeddable tags. Variants are selected
/// by position in the top-level chain (primary, then thumbnail) or by
/// the embedding tag that points at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IfdKind {
    /// Primary TIFF attribute directory
    Tiff,
    /// Thumbnail directory, a TIFF variant with an attached JPEG blob
    Thumbnail,
    /// Extended EXIF attribute directory
    Exif,
    /// GPS attribute directory
    Gps,
    /// Interoperability directory
    Interop,
    /// Canon maker note, always little-endian
    CanonNote,
    /// FujiFilm maker note, self-framed and always little-endian
    FujiNote,
}

/// How an embeddable tag's value is decoded
enum EmbeddedKind {
    /// A plain nested directory at an absolute blob offset
    Ifd(IfdKind),
    /// A vendor maker note, dispatched on the camera manufacturer
    MakerNote,
}

impl IfdKind {
    /// Human-readable name of this directory variant
    pub fn name(&self) -> &'static str {
        match self {
            IfdKind::Tiff => "TIFF",
            IfdKind::Thumbnail => "Thumbnail",
            IfdKind::Exif => "Extended EXIF",
            IfdKind::Gps => "GPS",
            IfdKind::Interop => "Interop",
            IfdKind::CanonNote => "Canon",
            IfdKind::FujiNote => "FujiFilm",
        }
    }

    /// Dictionary-declared wire type for a tag, if the dictionary has one
    ///
    /// Used when a new entry is created without a type of its own, and
    /// by the CLI layer to parse textual values.
    pub fn forced_type(&self, tag: u16) -> Option<u16> {
        match self {
            IfdKind::Tiff | IfdKind::Thumbnail => match tag {
                tiff_tags::EXIF_IFD_POINTER
                | tiff_tags::GPS_IFD_POINTER
                | tiff_tags::INTEROP_IFD_POINTER
                | tiff_tags::IMAGE_WIDTH
                | tiff_tags::IMAGE_HEIGHT
                | tiff_tags::STRIP_OFFSETS
                | tiff_tags::ROWS_PER_STRIP
                | tiff_tags::STRIP_BYTE_COUNTS
                | tiff_tags::JPEG_INTERCHANGE_FORMAT
                | tiff_tags::JPEG_INTERCHANGE_FORMAT_LENGTH => Some(type_codes::LONG),
                tiff_tags::BITS_PER_SAMPLE
                | tiff_tags::COMPRESSION
                | tiff_tags::PHOTOMETRIC_INTERPRETATION
                | tiff_tags::ORIENTATION
                | tiff_tags::SAMPLES_PER_PIXEL
                | tiff_tags::PLANAR_CONFIGURATION
                | tiff_tags::YCBCR_SUBSAMPLING
                | tiff_tags::YCBCR_POSITIONING
                | tiff_tags::RESOLUTION_UNIT => Some(type_codes::SHORT),
                tiff_tags::X_RESOLUTION | tiff_tags::Y_RESOLUTION => Some(type_codes::RATIONAL),
                tiff_tags::DATE_TIME
                | tiff_tags::IMAGE_DESCRIPTION
                | tiff_tags::MAKE
                | tiff_tags::MODEL
                | tiff_tags::SOFTWARE
                | tiff_tags::ARTIST
                | tiff_tags::COPYRIGHT => Some(type_codes::ASCII),
                _ => None,
            },
            IfdKind::Exif => match tag {
                crate::exif::constants::exif_tags::DATE_TIME_ORIGINAL
                | crate::exif::constants::exif_tags::DATE_TIME_DIGITIZED => {
                    Some(type_codes::ASCII)
                }
                _ => None,
            },
            IfdKind::Gps => match tag {
                gps_tags::VERSION_ID | gps_tags::ALTITUDE_REF => Some(type_codes::BYTE),
                gps_tags::LATITUDE_REF | gps_tags::LONGITUDE_REF => Some(type_codes::ASCII),
                gps_tags::LATITUDE | gps_tags::LONGITUDE | gps_tags::ALTITUDE => {
                    Some(type_codes::RATIONAL)
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Nested-directory rule for an embeddable tag, if this variant has one
    fn embedded_kind(&self, tag: u16) -> Option<EmbeddedKind> {
        match self {
            IfdKind::Tiff | IfdKind::Thumbnail => match tag {
                tiff_tags::EXIF_IFD_POINTER => Some(EmbeddedKind::Ifd(IfdKind::Exif)),
                tiff_tags::GPS_IFD_POINTER => Some(EmbeddedKind::Ifd(IfdKind::Gps)),
                tiff_tags::INTEROP_IFD_POINTER => Some(EmbeddedKind::Ifd(IfdKind::Interop)),
                _ => None,
            },
            IfdKind::Exif => match tag {
                crate::exif::constants::exif_tags::MAKER_NOTE => Some(EmbeddedKind::MakerNote),
                _ => None,
            },
            _ => None,
        }
    }
}

/// One Image File Directory
///
/// Entries keep their first-insertion order for serialization while a
/// tag index provides O(1) lookup and update. A thumbnail directory
/// additionally owns the opaque JPEG bytes its offset/length tag pair
/// points at.
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    kind: IfdKind,
    byte_order: ByteOrder,
    entries: Vec<DirectoryEntry>,
    tag_index: HashMap<u16, usize>,
    thumbnail: Option<Vec<u8>>,
}

impl Directory {
    /// Creates a new, empty directory
    pub fn new(kind: IfdKind, byte_order: ByteOrder) -> Self {
        trace!("Creating new {} directory ({})", kind.name(), byte_order.name());
        Directory {
            kind,
            byte_order,
            entries: Vec::new(),
            tag_index: HashMap::new(),
            thumbnail: None,
        }
    }

    pub fn kind(&self) -> IfdKind {
        self.kind
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// All entries in storage order
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether this directory has an entry for a tag
    pub fn has(&self, tag: u16) -> bool {
        self.tag_index.contains_key(&tag)
    }

    /// Gets the full entry for a tag, if present
    pub fn get_entry(&self, tag: u16) -> Option<&DirectoryEntry> {
        self.tag_index.get(&tag).map(|&i| &self.entries[i])
    }

    /// Gets a tag's value
    ///
    /// ASCII values come back with their trailing NUL trimmed; the
    /// stored entry keeps the wire form.
    pub fn get(&self, tag: u16) -> Option<TagValue> {
        self.get_entry(tag).map(|e| match &e.value {
            TagValue::Ascii(s) => TagValue::Ascii(string_utils::trim_trailing_nuls(s).to_string()),
            other => other.clone(),
        })
    }

    /// Gets a nested directory held by a pointer tag
    pub fn subdirectory(&self, tag: u16) -> Option<&Directory> {
        match &self.get_entry(tag)?.value {
            TagValue::Directory(d) => Some(d.as_ref()),
            _ => None,
        }
    }

    /// Mutable access to a nested directory held by a pointer tag
    pub fn subdirectory_mut(&mut self, tag: u16) -> Option<&mut Directory> {
        let idx = *self.tag_index.get(&tag)?;
        match &mut self.entries[idx].value {
            TagValue::Directory(d) => Some(d.as_mut()),
            _ => None,
        }
    }

    /// Sets, replaces or removes a tag
    ///
    /// `None` removes the entry. The wire type of a replaced entry is
    /// kept; a new entry takes the dictionary's forced type, falling
    /// back to the value's natural type. ASCII values gain a trailing
    /// NUL if the caller left it off.
    pub fn set(&mut self, tag: u16, value: Option<TagValue>) {
        let mut value = match value {
            Some(v) => v,
            None => {
                if let Some(idx) = self.tag_index.remove(&tag) {
                    trace!("Removing tag {:#06x} from {} directory", tag, self.kind.name());
                    self.entries.remove(idx);
                    self.reindex();
                }
                return;
            }
        };

        let type_code = self
            .get_entry(tag)
            .map(|e| e.type_code)
            .or_else(|| self.kind.forced_type(tag))
            .unwrap_or_else(|| value.type_code());

        if type_code == type_codes::ASCII {
            if let TagValue::Ascii(ref mut s) = value {
                string_utils::ensure_nul_terminated(s);
            }
        }

        trace!("Setting tag {:#06x} (type {}) in {} directory", tag, type_code, self.kind.name());
        match self.tag_index.get(&tag).copied() {
            Some(idx) => self.entries[idx] = DirectoryEntry::new(tag, type_code, value),
            None => self.push_entry(DirectoryEntry::new(tag, type_code, value)),
        }
    }

    /// Creates a fresh GPS directory and links it under the GPS pointer tag
    ///
    /// Fails with `AlreadyExists` if this directory already carries a
    /// GPS pointer. The new directory is seeded with the fixed GPS tag
    /// version 2.2.0.0.
    pub fn new_gps(&mut self) -> ExifResult<&mut Directory> {
        if self.has(tiff_tags::GPS_IFD_POINTER) {
            return Err(ExifError::AlreadyExists("GPS directory".to_string()));
        }

        debug!("Creating new GPS directory");
        let mut gps = Directory::new(IfdKind::Gps, self.byte_order);
        gps.set(gps_tags::VERSION_ID, Some(TagValue::Byte(vec![2, 2, 0, 0])));
        self.set(
            tiff_tags::GPS_IFD_POINTER,
            Some(TagValue::Directory(Box::new(gps))),
        );
        self.subdirectory_mut(tiff_tags::GPS_IFD_POINTER)
            .ok_or_else(|| ExifError::GenericError("GPS directory vanished after insert".to_string()))
    }

    /// Returns the nested directory for a pointer tag, creating it if absent
    pub fn ensure_subdirectory(&mut self, tag: u16, kind: IfdKind) -> ExifResult<&mut Directory> {
        if !self.has(tag) {
            let sub = Directory::new(kind, self.byte_order);
            self.set(tag, Some(TagValue::Directory(Box::new(sub))));
        }
        self.subdirectory_mut(tag).ok_or_else(|| {
            ExifError::GenericError(format!(
                "tag {:#06x} is present but does not hold a directory",
                tag
            ))
        })
    }

    /// The opaque thumbnail JPEG bytes, for thumbnail directories
    pub fn thumbnail(&self) -> Option<&[u8]> {
        self.thumbnail.as_deref()
    }

    fn push_entry(&mut self, entry: DirectoryEntry) {
        self.tag_index.insert(entry.tag, self.entries.len());
        self.entries.push(entry);
    }

    fn reindex(&mut self) {
        self.tag_index.clear();
        for (i, entry) in self.entries.iter().enumerate() {
            self.tag_index.insert(entry.tag, i);
        }
    }

    /// Pre-scans a primary directory's raw entry table for the camera
    /// manufacturer
    ///
    /// Maker note decoding depends on the manufacturer string, which
    /// lives in the same blob being decoded. Reading it up front and
    /// passing it down as an explicit parameter removes any ordering
    /// dependency between entries.
    pub(crate) fn scan_make(
        blob: &[u8],
        offset: u32,
        byte_order: ByteOrder,
    ) -> ExifResult<Option<String>> {
        let handler = byte_order.create_handler();
        let offset = offset as usize;
        let mut cursor = Cursor::new(entry::blob_slice(blob, offset, 2)?);
        let num_entries = handler.read_u16(&mut cursor)? as usize;

        for i in 0..num_entries {
            let raw = entry::read_raw_entry(blob, offset + 2 + i * ENTRY_SIZE, handler.as_ref())?;
            if raw.tag == tiff_tags::MAKE && raw.type_code == type_codes::ASCII {
                let bytes = entry::resolve_value_bytes(blob, &raw, handler.as_ref())?;
                let value = TagValue::decode(raw.type_code, raw.count, &bytes, handler.as_ref())?;
                let make = value.as_str().map(|s| s.to_string());
                debug!("Detected camera manufacturer: {:?}", make);
                return Ok(make);
            }
        }
        Ok(None)
    }

    /// Decodes one directory at `offset` in the TIFF blob
    ///
    /// Returns the directory and the offset of the next directory in
    /// the top-level chain (0 if this was the last one). Nested
    /// directories read but ignore that trailing offset.
    pub(crate) fn decode(
        kind: IfdKind,
        blob: &[u8],
        offset: u32,
        byte_order: ByteOrder,
        make: Option<&str>,
    ) -> ExifResult<(Directory, u32)> {
        let handler = byte_order.create_handler();
        let start = offset as usize;
        let mut cursor = Cursor::new(entry::blob_slice(blob, start, 2)?);
        let num_entries = handler.read_u16(&mut cursor)? as usize;
        debug!(
            "Decoding {} directory at offset {}: {} entries",
            kind.name(),
            start,
            num_entries
        );

        let mut dir = Directory::new(kind, byte_order);
        for i in 0..num_entries {
            let entry_offset = start + 2 + i * ENTRY_SIZE;
            let raw = entry::read_raw_entry(blob, entry_offset, handler.as_ref())?;

            let value = match kind.embedded_kind(raw.tag) {
                Some(EmbeddedKind::Ifd(sub_kind)) => {
                    let pointer = raw.value_or_offset(handler.as_ref())?;
                    let (sub, _) = Directory::decode(sub_kind, blob, pointer, byte_order, make)?;
                    TagValue::Directory(Box::new(sub))
                }
                Some(EmbeddedKind::MakerNote) => {
                    let pointer = raw.value_or_offset(handler.as_ref())?;
                    decode_maker_note(blob, pointer, make)?
                }
                None => {
                    let bytes = entry::resolve_value_bytes(blob, &raw, handler.as_ref())?;
                    TagValue::decode(raw.type_code, raw.count, &bytes, handler.as_ref())?
                }
            };

            dir.push_entry(DirectoryEntry::new(raw.tag, raw.type_code, value));
        }

        let next_pos = start + 2 + num_entries * ENTRY_SIZE;
        let mut cursor = Cursor::new(entry::blob_slice(blob, next_pos, 4)?);
        let next_offset = handler.read_u32(&mut cursor)?;

        if kind == IfdKind::Thumbnail {
            dir.capture_thumbnail(blob)?;
        }

        Ok((dir, next_offset))
    }

    /// Captures the thumbnail JPEG bytes declared by the offset/length
    /// tag pair
    fn capture_thumbnail(&mut self, blob: &[u8]) -> ExifResult<()> {
        let offset = self
            .get(tiff_tags::JPEG_INTERCHANGE_FORMAT)
            .and_then(|v| v.as_u32());
        let size = self
            .get(tiff_tags::JPEG_INTERCHANGE_FORMAT_LENGTH)
            .and_then(|v| v.as_u32());

        let (offset, size) = match (offset, size) {
            (Some(o), Some(s)) => (o, s),
            _ => {
                return Err(ExifError::InvalidFile(
                    "thumbnail directory is missing its JPEG offset and/or length".to_string(),
                ))
            }
        };

        let data = entry::blob_slice(blob, offset as usize, size as usize).map_err(|_| {
            ExifError::InvalidFile(format!(
                "not enough data for the JPEG thumbnail: wanted {} bytes at offset {}",
                size, offset
            ))
        })?;
        debug!("Captured {} byte thumbnail at offset {}", size, offset);
        self.thumbnail = Some(data.to_vec());
        Ok(())
    }

    /// Encodes this directory at `base_offset` in the TIFF blob
    ///
    /// Layout: entry count, fixed entry table, next-directory offset
    /// (0 when `last`), then the out-of-line area holding the thumbnail
    /// bytes, nested directory blocks and any value wider than the
    /// 4-byte inline slot, in entry order.
    pub(crate) fn encode(&self, base_offset: u32, last: bool) -> ExifResult<Vec<u8>> {
        let handler = self.byte_order.create_handler();
        let handler = handler.as_ref();
        let table_len = 2 + self.entries.len() * ENTRY_SIZE + 4;
        let mut data_offset = base_offset + table_len as u32;
        let mut tail: Vec<u8> = Vec::new();

        // Thumbnail image bytes lead the out-of-line area; the offset
        // tag is rewritten below to point at them.
        let thumbnail_offset = self.thumbnail.as_ref().map(|data| {
            let at = data_offset;
            tail.extend_from_slice(data);
            data_offset += data.len() as u32;
            at
        });

        struct WireEntry {
            tag: u16,
            type_code: u16,
            count: u32,
            slot: [u8; 4],
        }
        let mut wire_entries: Vec<WireEntry> = Vec::with_capacity(self.entries.len());

        for dir_entry in &self.entries {
            let rewritten;
            let value = match thumbnail_offset {
                Some(at) if dir_entry.tag == tiff_tags::JPEG_INTERCHANGE_FORMAT => {
                    rewritten = TagValue::Long(vec![at]);
                    &rewritten
                }
                _ => &dir_entry.value,
            };

            let wire = match value {
                TagValue::Directory(sub) => {
                    let block = sub.encode_block(data_offset)?;
                    let slot = handler.u32_bytes(data_offset);
                    // A LONG pointer keeps count 1; any other declared
                    // type carries the block length as its count.
                    let count = if dir_entry.type_code == type_codes::LONG {
                        1
                    } else {
                        block.len() as u32
                    };
                    data_offset += block.len() as u32;
                    tail.extend_from_slice(&block);
                    WireEntry { tag: dir_entry.tag, type_code: dir_entry.type_code, count, slot }
                }
                value => {
                    let mut bytes = value.encode(handler)?;
                    let count = value.count();
                    let slot = if bytes.len() > 4 {
                        let at = handler.u32_bytes(data_offset);
                        data_offset += bytes.len() as u32;
                        tail.extend_from_slice(&bytes);
                        at
                    } else {
                        bytes.resize(4, 0);
                        let mut slot = [0u8; 4];
                        slot.copy_from_slice(&bytes);
                        slot
                    };
                    WireEntry { tag: dir_entry.tag, type_code: dir_entry.type_code, count, slot }
                }
            };
            wire_entries.push(wire);
        }

        let mut out = Vec::with_capacity(table_len + tail.len());
        handler.write_u16(&mut out, self.entries.len() as u16)?;
        for wire in &wire_entries {
            entry::write_raw_entry(&mut out, handler, wire.tag, wire.type_code, wire.count, &wire.slot)?;
        }
        let next_offset = if last { 0 } else { data_offset };
        handler.write_u32(&mut out, next_offset)?;
        out.extend_from_slice(&tail);

        // The next free offset must land exactly at the end of the
        // encoded directory; anything else is a codec bug.
        assert_eq!(
            data_offset,
            base_offset + out.len() as u32,
            "directory encode offset bookkeeping is inconsistent"
        );

        trace!(
            "Encoded {} directory: {} bytes at offset {}",
            self.kind.name(),
            out.len(),
            base_offset
        );
        Ok(out)
    }

    /// Encodes this directory as an out-of-line block for its owning entry
    ///
    /// Most nested directories encode in place with absolute offsets.
    /// A FujiFilm maker note instead frames itself with its vendor
    /// header and keeps every internal offset relative to the start of
    /// its own block.
    fn encode_block(&self, base_offset: u32) -> ExifResult<Vec<u8>> {
        match self.kind {
            IfdKind::FujiNote => {
                let mut block = Vec::new();
                block.extend_from_slice(&header::FUJI_SIGNATURE);
                block.extend_from_slice(&12u32.to_le_bytes());
                let body = self.encode(12, true)?;
                block.extend_from_slice(&body);
                Ok(block)
            }
            _ => self.encode(base_offset, true),
        }
    }

    /// Writes a human-readable listing of this directory
    pub fn dump(&self, writer: &mut dyn Write, indent: &str) -> ExifResult<()> {
        writeln!(writer, "{}<--- {} start --->", indent, self.kind.name())?;
        for dir_entry in &self.entries {
            match &dir_entry.value {
                TagValue::Directory(sub) => {
                    let deeper = format!("{}    ", indent);
                    sub.dump(writer, &deeper)?;
                }
                value => writeln!(
                    writer,
                    "{}  {:<40} {}",
                    indent,
                    tag_utils::tag_name(self.kind, dir_entry.tag),
                    value
                )?,
            }
        }
        writeln!(writer, "{}<--- {} end --->", indent, self.kind.name())?;
        Ok(())
    }
}

/// Decodes a vendor maker note at `offset`, dispatching on the camera
/// manufacturer detected in the primary directory
///
/// Canon notes are a plain IFD that is always little-endian regardless
/// of the file's byte order, with offsets absolute into the TIFF blob.
/// FujiFilm notes carry their own "FUJIFILM" header and internal
/// offset, with every offset relative to the start of the note block,
/// also always little-endian. This divergence is a real vendor format
/// inconsistency and is preserved as-is. Any other manufacturer is a
/// fatal decode error.
fn decode_maker_note(blob: &[u8], offset: u32, make: Option<&str>) -> ExifResult<TagValue> {
    match make {
        Some("Canon") => {
            let (dir, _) =
                Directory::decode(IfdKind::CanonNote, blob, offset, ByteOrder::LittleEndian, make)?;
            Ok(TagValue::Directory(Box::new(dir)))
        }
        Some("FUJIFILM") => {
            let start = offset as usize;
            let head = entry::blob_slice(blob, start, 8)?;
            if head != &header::FUJI_SIGNATURE[..] {
                return Err(ExifError::InvalidFile(format!(
                    "expecting a FujiFilm maker note header <FUJIFILM>, got <{}>",
                    String::from_utf8_lossy(head)
                )));
            }
            let mut offset_bytes = [0u8; 4];
            offset_bytes.copy_from_slice(entry::blob_slice(blob, start + 8, 4)?);
            let internal_offset = u32::from_le_bytes(offset_bytes);
            // Offsets inside the note are relative to the note itself
            let note_blob = &blob[start..];
            let (dir, _) = Directory::decode(
                IfdKind::FujiNote,
                note_blob,
                internal_offset,
                ByteOrder::LittleEndian,
                make,
            )?;
            Ok(TagValue::Directory(Box::new(dir)))
        }
        Some(other) => Err(ExifError::InvalidFile(format!(
            "unsupported maker note vendor <{}>",
            other
        ))),
        None => Err(ExifError::InvalidFile(
            "maker note present but the camera manufacturer is unknown".to_string(),
        )),
    }
}
