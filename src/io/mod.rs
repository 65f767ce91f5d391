//! I/O abstractions
//!
//! Byte sources, byte sinks and byte order handling shared by the
//! JPEG framer and the EXIF codec.

pub mod byte_order;
pub mod seekable;
