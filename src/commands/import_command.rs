//! EXIF import command
//!
//! Replaces a file's EXIF segment with the EXIF segment of another
//! file, copying the whole metadata block in one move.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::exif::errors::{ExifError, ExifResult};
use crate::jpeg::JpegFile;
use crate::utils::logger::Logger;

/// Command for importing another file's EXIF segment
pub struct ImportCommand<'a> {
    input_file: String,
    source_file: String,
    output_file: String,
    logger: &'a Logger,
}

impl<'a> ImportCommand<'a> {
    /// Create a new import command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ExifResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| ExifError::GenericError("Missing input file".to_string()))?
            .clone();
        let source_file = args
            .get_one::<String>("import-exif")
            .ok_or_else(|| ExifError::GenericError("Missing import source file".to_string()))?
            .clone();
        let output_file = args
            .get_one::<String>("output")
            .ok_or_else(|| {
                ExifError::GenericError("--output is required when importing EXIF".to_string())
            })?
            .clone();

        Ok(ImportCommand { input_file, source_file, output_file, logger })
    }
}

impl<'a> Command for ImportCommand<'a> {
    fn execute(&self) -> ExifResult<()> {
        info!("Importing EXIF from {} into {}", self.source_file, self.input_file);
        self.logger
            .log(&format!("Importing EXIF from {}", self.source_file))?;

        let source = JpegFile::from_file(&self.source_file)?;
        let mut jpeg = JpegFile::from_file(&self.input_file)?;
        jpeg.import_exif(&source)?;
        jpeg.write_file(&self.output_file)?;
        Ok(())
    }
}
