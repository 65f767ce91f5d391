//! JPEG segment stream module
//!
//! The framer that splits a JPEG byte stream into marker-delimited
//! segments and reassembles it, plus the file container that owns the
//! segment list and the metadata convenience operations.

pub mod file;
pub mod markers;
pub mod segment;

#[cfg(test)]
mod tests;

pub use file::{JpegFile, StripPolicy};
pub use segment::{Segment, SegmentBody};
