//! Seekable reader trait
//!
//! A unified trait for byte sources that support both reading and
//! seeking. File handles, buffered readers and in-memory cursors all
//! qualify, which is what lets the JPEG framer, the EXIF codec and the
//! tests share one code path.

use std::io::{Read, Seek};

/// Trait for byte sources that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
