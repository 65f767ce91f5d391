//! Unit tests for the EXIF codec

mod test_utils;
mod value_tests;
