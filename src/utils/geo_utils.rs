//! GPS coordinate conversion utilities
//!
//! Conversions between signed decimal degrees and the
//! degrees/minutes/seconds rational triplets the GPS directory stores.

use crate::exif::value::Rational;

/// Denominator used for the seconds rational
///
/// Large enough that the fractional remainder of a coordinate survives
/// a round trip well below the micro-degree level.
pub const SECONDS_DENOMINATOR: u32 = 50_000_000;

/// Splits a signed decimal coordinate into sign, degrees, minutes and
/// scaled seconds
///
/// The seconds come back pre-multiplied by [`SECONDS_DENOMINATOR`],
/// ready to be stored as a rational numerator.
pub fn degrees_to_dms(value: f64) -> (i32, u32, u32, u32) {
    let sign = if value < 0.0 { -1 } else { 1 };
    let value = value.abs();

    let degrees = value.trunc();
    let rest = (value - degrees) * 60.0;
    let minutes = rest.trunc();
    let seconds = (rest - minutes) * 60.0;
    let scaled_seconds = (seconds * f64::from(SECONDS_DENOMINATOR)) as u32;

    (sign, degrees as u32, minutes as u32, scaled_seconds)
}

/// Combines a degrees/minutes/seconds rational triplet into decimal
/// degrees
pub fn dms_to_degrees(degrees: &Rational, minutes: &Rational, seconds: &Rational) -> f64 {
    degrees.as_f64() + minutes.as_f64() / 60.0 + seconds.as_f64() / 3600.0
}
