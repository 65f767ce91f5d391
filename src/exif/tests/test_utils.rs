use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

/// Creates a minimal little-endian EXIF payload: signature, TIFF
/// header and a primary directory holding one inline SHORT tag
/// (Orientation = 1).
pub fn minimal_exif_payload() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"Exif\0\0");
    data.extend_from_slice(b"II");
    data.write_u16::<LittleEndian>(0x2A).unwrap(); // TIFF magic
    data.write_u32::<LittleEndian>(8).unwrap();    // First IFD offset

    // IFD0 at offset 8 with a single entry
    data.write_u16::<LittleEndian>(1).unwrap();    // Entry count

    // Orientation (0x112), SHORT, count 1, value 1 inline
    data.write_u16::<LittleEndian>(0x112).unwrap();
    data.write_u16::<LittleEndian>(3).unwrap();
    data.write_u32::<LittleEndian>(1).unwrap();
    data.write_u16::<LittleEndian>(1).unwrap();
    data.write_u16::<LittleEndian>(0).unwrap();    // Inline padding

    // Next IFD offset (0 = no more IFDs)
    data.write_u32::<LittleEndian>(0).unwrap();
    data
}

/// Creates a big-endian EXIF payload carrying a Canon maker note that
/// is itself little-endian, the way Canon firmware writes it.
///
/// Layout of the TIFF blob:
///   8: IFD0 (Make -> "Canon", Exif IFD pointer -> 44), next = 0
///  38: "Canon\0"
///  44: extended EXIF IFD (maker note, UNDEFINED x 18 -> 62)
///  62: Canon note IFD, little-endian (owner name "abc" inline)
pub fn canon_exif_payload_big_endian() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"Exif\0\0");
    data.extend_from_slice(b"MM");
    data.write_u16::<BigEndian>(0x2A).unwrap();
    data.write_u32::<BigEndian>(8).unwrap();

    // IFD0: two entries
    data.write_u16::<BigEndian>(2).unwrap();
    // Make (0x10f), ASCII, count 6, out-of-line at 38
    data.write_u16::<BigEndian>(0x10F).unwrap();
    data.write_u16::<BigEndian>(2).unwrap();
    data.write_u32::<BigEndian>(6).unwrap();
    data.write_u32::<BigEndian>(38).unwrap();
    // Exif IFD pointer (0x8769), LONG, count 1, at 44
    data.write_u16::<BigEndian>(0x8769).unwrap();
    data.write_u16::<BigEndian>(4).unwrap();
    data.write_u32::<BigEndian>(1).unwrap();
    data.write_u32::<BigEndian>(44).unwrap();
    // Next IFD offset
    data.write_u32::<BigEndian>(0).unwrap();

    // Out-of-line Make value at 38
    data.extend_from_slice(b"Canon\0");

    // Extended EXIF IFD at 44: one maker note entry
    data.write_u16::<BigEndian>(1).unwrap();
    // MakerNote (0x927c), UNDEFINED, count = note length 18, at 62
    data.write_u16::<BigEndian>(0x927C).unwrap();
    data.write_u16::<BigEndian>(7).unwrap();
    data.write_u32::<BigEndian>(18).unwrap();
    data.write_u32::<BigEndian>(62).unwrap();
    data.write_u32::<BigEndian>(0).unwrap();

    // Canon note IFD at 62, always little-endian
    data.write_u16::<LittleEndian>(1).unwrap();
    // Owner name (0x0009), ASCII, count 4, inline "abc\0"
    data.write_u16::<LittleEndian>(0x0009).unwrap();
    data.write_u16::<LittleEndian>(2).unwrap();
    data.write_u32::<LittleEndian>(4).unwrap();
    data.extend_from_slice(b"abc\0");
    data.write_u32::<LittleEndian>(0).unwrap();

    data
}

/// Creates a little-endian EXIF payload carrying a FujiFilm maker note
/// with its vendor header and note-relative offsets.
///
/// Layout of the TIFF blob:
///   8: IFD0 (Make -> "FUJIFILM", Exif IFD pointer -> 47), next = 0
///  38: "FUJIFILM\0"
///  47: extended EXIF IFD (maker note, UNDEFINED x 37 -> 65)
///  65: note block: "FUJIFILM" + offset 12, then the note IFD whose
///      offsets are relative to 65
pub fn fuji_exif_payload() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"Exif\0\0");
    data.extend_from_slice(b"II");
    data.write_u16::<LittleEndian>(0x2A).unwrap();
    data.write_u32::<LittleEndian>(8).unwrap();

    // IFD0: two entries
    data.write_u16::<LittleEndian>(2).unwrap();
    // Make (0x10f), ASCII, count 9, out-of-line at 38
    data.write_u16::<LittleEndian>(0x10F).unwrap();
    data.write_u16::<LittleEndian>(2).unwrap();
    data.write_u32::<LittleEndian>(9).unwrap();
    data.write_u32::<LittleEndian>(38).unwrap();
    // Exif IFD pointer (0x8769), LONG, count 1, at 47
    data.write_u16::<LittleEndian>(0x8769).unwrap();
    data.write_u16::<LittleEndian>(4).unwrap();
    data.write_u32::<LittleEndian>(1).unwrap();
    data.write_u32::<LittleEndian>(47).unwrap();
    // Next IFD offset
    data.write_u32::<LittleEndian>(0).unwrap();

    // Out-of-line Make value at 38
    data.extend_from_slice(b"FUJIFILM\0");

    // Extended EXIF IFD at 47: one maker note entry
    data.write_u16::<LittleEndian>(1).unwrap();
    // MakerNote (0x927c), UNDEFINED, count = note length 37, at 65
    data.write_u16::<LittleEndian>(0x927C).unwrap();
    data.write_u16::<LittleEndian>(7).unwrap();
    data.write_u32::<LittleEndian>(37).unwrap();
    data.write_u32::<LittleEndian>(65).unwrap();
    data.write_u32::<LittleEndian>(0).unwrap();

    // Note block at 65: vendor header, then its own IFD at relative 12
    data.extend_from_slice(b"FUJIFILM");
    data.write_u32::<LittleEndian>(12).unwrap();
    data.write_u16::<LittleEndian>(1).unwrap();
    // Quality (0x1000), ASCII, count 7, at relative offset 30
    data.write_u16::<LittleEndian>(0x1000).unwrap();
    data.write_u16::<LittleEndian>(2).unwrap();
    data.write_u32::<LittleEndian>(7).unwrap();
    data.write_u32::<LittleEndian>(30).unwrap();
    data.write_u32::<LittleEndian>(0).unwrap();
    data.extend_from_slice(b"NORMAL\0");

    data
}
