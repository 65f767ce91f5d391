//! Directory entry codec
//!
//! Each IFD entry is a fixed 12-byte record: tag (u16), type code
//! (u16), component count (u32) and a 4-byte value slot. When the
//! value's wire size fits in 4 bytes it lives inline in the slot,
//! otherwise the slot holds an absolute offset into the enclosing TIFF
//! blob where the value bytes are stored out-of-line.

use log::trace;

use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::value::{type_size, TagValue};
use crate::io::byte_order::ByteOrderHandler;

/// Size of the fixed on-wire entry record
pub const ENTRY_SIZE: usize = 12;

/// A decoded directory entry
///
/// `type_code` keeps the declared wire type even when the value is an
/// embedded directory, so pointer tags re-encode as LONG while a maker
/// note declared UNDEFINED re-encodes as UNDEFINED. That preservation
/// is what makes untouched files round-trip byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryEntry {
    pub tag: u16,
    pub type_code: u16,
    pub value: TagValue,
}

impl DirectoryEntry {
    pub fn new(tag: u16, type_code: u16, value: TagValue) -> Self {
        DirectoryEntry { tag, type_code, value }
    }
}

/// The raw fields of one on-wire entry record
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawEntry {
    pub tag: u16,
    pub type_code: u16,
    pub count: u32,
    /// The last 4 bytes of the record, still undecoded
    pub value_slot: [u8; 4],
}

impl RawEntry {
    /// Decodes the value slot as an offset/long in the blob's byte order
    pub fn value_or_offset(&self, handler: &dyn ByteOrderHandler) -> ExifResult<u32> {
        let mut cursor = std::io::Cursor::new(&self.value_slot[..]);
        Ok(handler.read_u32(&mut cursor)?)
    }

    /// Total wire size of this entry's value in bytes
    pub fn byte_size(&self) -> ExifResult<usize> {
        let size = type_size(self.type_code)?
            .checked_mul(self.count as usize)
            .ok_or_else(|| {
                ExifError::InvalidFile(format!(
                    "entry value size overflows: type {} count {}",
                    self.type_code, self.count
                ))
            })?;
        Ok(size)
    }
}

/// Returns `len` bytes of the blob starting at `offset`, bounds-checked
///
/// Malformed offsets and truncated buffers surface as `InvalidFile`
/// instead of panicking.
pub(crate) fn blob_slice(blob: &[u8], offset: usize, len: usize) -> ExifResult<&[u8]> {
    let end = offset.checked_add(len).ok_or_else(|| {
        ExifError::InvalidFile(format!("offset {} + length {} overflows", offset, len))
    })?;
    blob.get(offset..end).ok_or_else(|| {
        ExifError::InvalidFile(format!(
            "data out of bounds: {} bytes at offset {} in a {} byte blob",
            len,
            offset,
            blob.len()
        ))
    })
}

/// Reads the raw 12-byte entry record at `offset` in the blob
pub(crate) fn read_raw_entry(
    blob: &[u8],
    offset: usize,
    handler: &dyn ByteOrderHandler,
) -> ExifResult<RawEntry> {
    let record = blob_slice(blob, offset, ENTRY_SIZE)?;
    let mut cursor = std::io::Cursor::new(record);

    let tag = handler.read_u16(&mut cursor)?;
    let type_code = handler.read_u16(&mut cursor)?;
    let count = handler.read_u32(&mut cursor)?;
    let mut value_slot = [0u8; 4];
    value_slot.copy_from_slice(&record[8..12]);

    trace!("Raw entry at {}: tag={:#06x}, type={}, count={}", offset, tag, type_code, count);

    Ok(RawEntry { tag, type_code, count, value_slot })
}

/// Resolves the value bytes for a raw entry
///
/// Applies the 4-byte indirection rule: small values come from the
/// inline slot, larger ones from the out-of-line area the slot points
/// at.
pub(crate) fn resolve_value_bytes(
    blob: &[u8],
    raw: &RawEntry,
    handler: &dyn ByteOrderHandler,
) -> ExifResult<Vec<u8>> {
    let size = raw.byte_size()?;
    if size <= 4 {
        Ok(raw.value_slot[..size].to_vec())
    } else {
        let offset = raw.value_or_offset(handler)? as usize;
        trace!("Entry value of {} bytes out-of-line at offset {}", size, offset);
        Ok(blob_slice(blob, offset, size)?.to_vec())
    }
}

/// Writes one 12-byte entry record
pub(crate) fn write_raw_entry(
    out: &mut Vec<u8>,
    handler: &dyn ByteOrderHandler,
    tag: u16,
    type_code: u16,
    count: u32,
    value_slot: &[u8; 4],
) -> ExifResult<()> {
    handler.write_u16(out, tag)?;
    handler.write_u16(out, type_code)?;
    handler.write_u32(out, count)?;
    out.extend_from_slice(value_slot);
    Ok(())
}
