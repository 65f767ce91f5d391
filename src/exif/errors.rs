//! Custom error types for JPEG/EXIF processing

use std::fmt;
use std::io;

/// EXIF-specific error types
#[derive(Debug)]
pub enum ExifError {
    /// I/O error
    IoError(io::Error),
    /// Malformed top-level structure, fatal to the current decode
    InvalidFile(String),
    /// A specialized segment decoder declining data that is not its own.
    /// This is a local signal caught by the JPEG framer, which then
    /// falls through to the generic segment decoder. It must never
    /// escape the framer.
    InvalidSegment(String),
    /// Value type code the codec has no rule for
    UnsupportedType(u16),
    /// Tag name no dictionary can resolve
    UnsupportedTag(String),
    /// A requested sub-structure (EXIF segment, GPS directory) is absent
    NoSection(String),
    /// Creation of a sub-structure that is already present
    AlreadyExists(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for ExifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExifError::IoError(e) => write!(f, "I/O error: {}", e),
            ExifError::InvalidFile(msg) => write!(f, "Invalid file: {}", msg),
            ExifError::InvalidSegment(msg) => write!(f, "Invalid segment: {}", msg),
            ExifError::UnsupportedType(code) => write!(f, "Unsupported value type: {}", code),
            ExifError::UnsupportedTag(name) => write!(f, "Unsupported tag: {}", name),
            ExifError::NoSection(msg) => write!(f, "No such section: {}", msg),
            ExifError::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            ExifError::GenericError(msg) => write!(f, "EXIF error: {}", msg),
        }
    }
}

impl std::error::Error for ExifError {}

impl From<io::Error> for ExifError {
    fn from(error: io::Error) -> Self {
        ExifError::IoError(error)
    }
}

impl From<String> for ExifError {
    fn from(msg: String) -> Self {
        ExifError::GenericError(msg)
    }
}

/// Result type for EXIF operations
pub type ExifResult<T> = Result<T, ExifError>;
