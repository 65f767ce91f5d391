//! Metadata stripping command
//!
//! Removes metadata-bearing segments from a JPEG file. The default
//! policy drops the application-reserved segments and comments;
//! --paranoid also drops anything not needed to decode the image.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::exif::errors::{ExifError, ExifResult};
use crate::jpeg::{JpegFile, StripPolicy};
use crate::utils::logger::Logger;

/// Command for stripping metadata segments
pub struct StripCommand<'a> {
    input_file: String,
    output_file: String,
    paranoid: bool,
    logger: &'a Logger,
}

impl<'a> StripCommand<'a> {
    /// Create a new strip command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ExifResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| ExifError::GenericError("Missing input file".to_string()))?
            .clone();
        let output_file = args
            .get_one::<String>("output")
            .ok_or_else(|| {
                ExifError::GenericError(
                    "--output is required when stripping metadata".to_string(),
                )
            })?
            .clone();
        let paranoid = args.get_flag("paranoid");

        Ok(StripCommand { input_file, output_file, paranoid, logger })
    }
}

impl<'a> Command for StripCommand<'a> {
    fn execute(&self) -> ExifResult<()> {
        let policy = if self.paranoid {
            StripPolicy::paranoid()
        } else {
            StripPolicy::default()
        };

        let mut jpeg = JpegFile::from_file(&self.input_file)?;
        let removed = jpeg.strip_metadata(&policy);
        info!("Stripped {} metadata segments from {}", removed, self.input_file);
        self.logger.log(&format!("Stripped {} metadata segments", removed))?;

        jpeg.write_file(&self.output_file)?;
        println!("Removed {} segments", removed);
        Ok(())
    }
}
