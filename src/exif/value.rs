//! Tag value model and wire codec
//!
//! This module implements the polymorphic value types a directory
//! entry can hold, keyed by the numeric TIFF type code, together with
//! the byte-level decode and encode of those values. Sizing rules are
//! fixed by the type code, so a value's wire length is always
//! `type_size(code) * component_count`.

use std::fmt;
use std::io::Cursor;

use log::trace;

use crate::exif::constants::type_codes;
use crate::exif::directory::Directory;
use crate::exif::errors::{ExifError, ExifResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::utils::string_utils;

/// An unsigned rational number, stored as numerator/denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: u32,
    pub den: u32,
}

impl Rational {
    pub fn new(num: u32, den: u32) -> Self {
        Rational { num, den }
    }

    /// Value of this rational as a floating point number
    pub fn as_f64(&self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.num, self.den)
    }
}

/// A signed rational number, stored as numerator/denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SRational {
    pub num: i32,
    pub den: i32,
}

impl SRational {
    pub fn new(num: i32, den: i32) -> Self {
        SRational { num, den }
    }
}

impl fmt::Display for SRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.num, self.den)
    }
}

/// Returns the per-component byte size for a value type code
///
/// Only the types that occur in EXIF metadata are sized; any other
/// code fails with `UnsupportedType` rather than being guessed at.
pub fn type_size(type_code: u16) -> ExifResult<usize> {
    match type_code {
        type_codes::BYTE | type_codes::ASCII | type_codes::UNDEFINED => Ok(1),
        type_codes::SHORT => Ok(2),
        type_codes::LONG | type_codes::SLONG => Ok(4),
        type_codes::RATIONAL | type_codes::SRATIONAL => Ok(8),
        _ => Err(ExifError::UnsupportedType(type_code)),
    }
}

/// A decoded directory entry value
///
/// A closed set of variants mirroring the wire type codes, plus the
/// `Directory` variant used by entries whose tag is declared embeddable
/// (the sub-IFD pointer tags and the vendor maker note). On the wire an
/// embedded directory is an offset pointer with its bytes out-of-line.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Byte(Vec<u8>),
    /// ASCII text, kept in its wire form with the trailing NUL
    Ascii(String),
    Short(Vec<u16>),
    Long(Vec<u32>),
    SLong(Vec<i32>),
    Rational(Vec<Rational>),
    SRational(Vec<SRational>),
    Undefined(Vec<u8>),
    Directory(Box<Directory>),
}

impl TagValue {
    /// The natural wire type code for this value
    pub fn type_code(&self) -> u16 {
        match self {
            TagValue::Byte(_) => type_codes::BYTE,
            TagValue::Ascii(_) => type_codes::ASCII,
            TagValue::Short(_) => type_codes::SHORT,
            TagValue::Long(_) => type_codes::LONG,
            TagValue::SLong(_) => type_codes::SLONG,
            TagValue::Rational(_) => type_codes::RATIONAL,
            TagValue::SRational(_) => type_codes::SRATIONAL,
            TagValue::Undefined(_) => type_codes::UNDEFINED,
            // Embedded directories travel as a LONG offset pointer
            TagValue::Directory(_) => type_codes::LONG,
        }
    }

    /// Number of wire components in this value
    pub fn count(&self) -> u32 {
        match self {
            TagValue::Byte(v) => v.len() as u32,
            TagValue::Ascii(s) => s.len() as u32,
            TagValue::Short(v) => v.len() as u32,
            TagValue::Long(v) => v.len() as u32,
            TagValue::SLong(v) => v.len() as u32,
            TagValue::Rational(v) => v.len() as u32,
            TagValue::SRational(v) => v.len() as u32,
            TagValue::Undefined(v) => v.len() as u32,
            TagValue::Directory(_) => 1,
        }
    }

    /// Returns the first component as a u32, if the value is numeric
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            TagValue::Short(v) => v.first().map(|&x| u32::from(x)),
            TagValue::Long(v) => v.first().copied(),
            TagValue::Byte(v) => v.first().map(|&x| u32::from(x)),
            _ => None,
        }
    }

    /// Returns the logical string of an ASCII value, trailing NULs trimmed
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::Ascii(s) => Some(string_utils::trim_trailing_nuls(s)),
            _ => None,
        }
    }

    /// Decodes a value from its raw wire bytes
    ///
    /// `bytes` must hold exactly `type_size(type_code) * count` bytes,
    /// already resolved from the inline slot or the out-of-line area.
    /// ASCII values missing their trailing NUL are corrected here by
    /// appending one, the single place decode tolerates non-conformant
    /// input.
    pub fn decode(
        type_code: u16,
        count: u32,
        bytes: &[u8],
        handler: &dyn ByteOrderHandler,
    ) -> ExifResult<TagValue> {
        trace!("Decoding value: type={}, count={}, {} bytes", type_code, count, bytes.len());

        let mut cursor = Cursor::new(bytes);
        let count = count as usize;
        match type_code {
            type_codes::BYTE => Ok(TagValue::Byte(bytes.to_vec())),
            type_codes::UNDEFINED => Ok(TagValue::Undefined(bytes.to_vec())),
            type_codes::ASCII => {
                let mut text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    ExifError::GenericError(format!("ASCII value is not valid text: {}", e))
                })?;
                string_utils::ensure_nul_terminated(&mut text);
                Ok(TagValue::Ascii(text))
            }
            type_codes::SHORT => {
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(handler.read_u16(&mut cursor)?);
                }
                Ok(TagValue::Short(values))
            }
            type_codes::LONG => {
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(handler.read_u32(&mut cursor)?);
                }
                Ok(TagValue::Long(values))
            }
            type_codes::SLONG => {
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(handler.read_i32(&mut cursor)?);
                }
                Ok(TagValue::SLong(values))
            }
            type_codes::RATIONAL => {
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    let (num, den) = handler.read_rational(&mut cursor)?;
                    values.push(Rational::new(num, den));
                }
                Ok(TagValue::Rational(values))
            }
            type_codes::SRATIONAL => {
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    let (num, den) = handler.read_srational(&mut cursor)?;
                    values.push(SRational::new(num, den));
                }
                Ok(TagValue::SRational(values))
            }
            _ => Err(ExifError::UnsupportedType(type_code)),
        }
    }

    /// Encodes this value to its raw wire bytes
    ///
    /// Directory values are not handled here; the directory encoder
    /// recurses into them and stores an offset pointer instead.
    pub fn encode(&self, handler: &dyn ByteOrderHandler) -> ExifResult<Vec<u8>> {
        let mut out = Vec::new();
        match self {
            TagValue::Byte(v) | TagValue::Undefined(v) => out.extend_from_slice(v),
            TagValue::Ascii(s) => out.extend_from_slice(s.as_bytes()),
            TagValue::Short(v) => {
                for &value in v {
                    handler.write_u16(&mut out, value)?;
                }
            }
            TagValue::Long(v) => {
                for &value in v {
                    handler.write_u32(&mut out, value)?;
                }
            }
            TagValue::SLong(v) => {
                for &value in v {
                    handler.write_i32(&mut out, value)?;
                }
            }
            TagValue::Rational(v) => {
                for r in v {
                    handler.write_u32(&mut out, r.num)?;
                    handler.write_u32(&mut out, r.den)?;
                }
            }
            TagValue::SRational(v) => {
                for r in v {
                    handler.write_i32(&mut out, r.num)?;
                    handler.write_i32(&mut out, r.den)?;
                }
            }
            TagValue::Directory(_) => {
                return Err(ExifError::GenericError(
                    "embedded directory values are encoded by the directory codec".to_string(),
                ));
            }
        }
        Ok(out)
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            if items.len() == 1 {
                return write!(f, "{}", items[0]);
            }
            write!(f, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", item)?;
            }
            write!(f, "]")
        }

        match self {
            TagValue::Byte(v) | TagValue::Undefined(v) => list(f, v),
            TagValue::Ascii(s) => write!(f, "{}", string_utils::trim_trailing_nuls(s)),
            TagValue::Short(v) => list(f, v),
            TagValue::Long(v) => list(f, v),
            TagValue::SLong(v) => list(f, v),
            TagValue::Rational(v) => list(f, v),
            TagValue::SRational(v) => list(f, v),
            TagValue::Directory(d) => write!(f, "<{} directory>", d.kind().name()),
        }
    }
}
