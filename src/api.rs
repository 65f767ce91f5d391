//! High-level library facade

use log::info;

use crate::exif::errors::{ExifError, ExifResult};
use crate::jpeg::{JpegFile, StripPolicy};
use crate::utils::logger::Logger;

/// Main interface to the exifkit library
///
/// A thin convenience layer for host applications that want the common
/// operations without assembling `JpegFile` calls themselves.
pub struct ExifKit {
    logger: Logger,
}

impl ExifKit {
    /// Create a new ExifKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "exifkit.log"
    pub fn new(log_file: Option<&str>) -> ExifResult<Self> {
        let log_path = log_file.unwrap_or("exifkit.log");
        let logger = Logger::new(log_path)?;
        Ok(ExifKit { logger })
    }

    /// Analyze a JPEG file and return its structural dump
    pub fn analyze(&self, input_path: &str) -> ExifResult<String> {
        self.logger.log(&format!("Analyzing {}", input_path))?;

        let jpeg = JpegFile::from_file(input_path)?;
        let mut out = Vec::new();
        jpeg.dump(&mut out)?;
        String::from_utf8(out)
            .map_err(|e| ExifError::GenericError(format!("dump is not valid UTF-8: {}", e)))
    }

    /// Read a single tag by name, rendered as display text
    pub fn get_tag(&self, input_path: &str, name: &str) -> ExifResult<Option<String>> {
        let jpeg = JpegFile::from_file(input_path)?;
        Ok(jpeg.get_tag(name)?.map(|value| value.to_string()))
    }

    /// Set a single tag by name and write the result
    pub fn set_tag(
        &self,
        input_path: &str,
        output_path: &str,
        name: &str,
        value: &str,
    ) -> ExifResult<()> {
        self.logger.log(&format!("Setting {} = {} in {}", name, value, input_path))?;

        let mut jpeg = JpegFile::from_file(input_path)?;
        jpeg.set_tag(name, value)?;
        jpeg.write_file(output_path)
    }

    /// Delete a single tag by name and write the result
    pub fn delete_tag(&self, input_path: &str, output_path: &str, name: &str) -> ExifResult<()> {
        self.logger.log(&format!("Deleting {} from {}", name, input_path))?;

        let mut jpeg = JpegFile::from_file(input_path)?;
        jpeg.delete_tag(name)?;
        jpeg.write_file(output_path)
    }

    /// Read the GPS location as signed decimal degrees
    pub fn get_gps(&self, input_path: &str) -> ExifResult<(f64, f64)> {
        let jpeg = JpegFile::from_file(input_path)?;
        jpeg.get_geo()
    }

    /// Set the GPS location and write the result
    pub fn set_gps(
        &self,
        input_path: &str,
        output_path: &str,
        lat: f64,
        lng: f64,
    ) -> ExifResult<()> {
        self.logger
            .log(&format!("Setting GPS location of {} to ({}, {})", input_path, lat, lng))?;

        let mut jpeg = JpegFile::from_file(input_path)?;
        jpeg.set_geo(lat, lng)?;
        jpeg.write_file(output_path)
    }

    /// Strip metadata segments and write the result
    ///
    /// Returns how many segments were removed.
    pub fn strip(
        &self,
        input_path: &str,
        output_path: &str,
        paranoid: bool,
    ) -> ExifResult<usize> {
        let policy = if paranoid { StripPolicy::paranoid() } else { StripPolicy::default() };

        let mut jpeg = JpegFile::from_file(input_path)?;
        let removed = jpeg.strip_metadata(&policy);
        info!("Stripped {} metadata segments from {}", removed, input_path);
        self.logger.log(&format!("Stripped {} metadata segments", removed))?;

        jpeg.write_file(output_path)?;
        Ok(removed)
    }

    /// Replace a file's EXIF segment with another file's and write the
    /// result
    pub fn import_exif(
        &self,
        input_path: &str,
        source_path: &str,
        output_path: &str,
    ) -> ExifResult<()> {
        self.logger
            .log(&format!("Importing EXIF from {} into {}", source_path, input_path))?;

        let source = JpegFile::from_file(source_path)?;
        let mut jpeg = JpegFile::from_file(input_path)?;
        jpeg.import_exif(&source)?;
        jpeg.write_file(output_path)
    }
}
