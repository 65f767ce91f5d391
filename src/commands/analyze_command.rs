//! JPEG/EXIF structure analysis command
//!
//! This module implements the default command: load a file, frame it
//! into segments and print a human-readable dump of every segment and
//! each EXIF directory.

use std::io;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::exif::errors::{ExifError, ExifResult};
use crate::jpeg::JpegFile;
use crate::utils::logger::Logger;

/// Command for dumping JPEG file structure
pub struct AnalyzeCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> AnalyzeCommand<'a> {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ExifResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| ExifError::GenericError("Missing input file".to_string()))?
            .clone();

        Ok(AnalyzeCommand { input_file, logger })
    }
}

impl<'a> Command for AnalyzeCommand<'a> {
    fn execute(&self) -> ExifResult<()> {
        info!("Analyzing {}", self.input_file);
        self.logger.log(&format!("Analyzing {}", self.input_file))?;

        let jpeg = JpegFile::from_file(&self.input_file)?;
        let mut stdout = io::stdout();
        jpeg.dump(&mut stdout)?;
        Ok(())
    }
}
