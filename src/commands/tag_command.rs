//! Tag get/set/delete command
//!
//! Reads, writes or removes a single metadata tag addressed by name
//! (or bare numeric form). Mutations are written to the --output file,
//! never back over the input.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::exif::errors::{ExifError, ExifResult};
use crate::jpeg::JpegFile;
use crate::utils::logger::Logger;

/// Which tag operation was requested
enum TagAction {
    Get(String),
    Set { name: String, value: String },
    Delete(String),
}

/// Command for single-tag operations
pub struct TagCommand<'a> {
    input_file: String,
    output_file: Option<String>,
    action: TagAction,
    logger: &'a Logger,
}

impl<'a> TagCommand<'a> {
    /// Create a new tag command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ExifResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| ExifError::GenericError("Missing input file".to_string()))?
            .clone();
        let output_file = args.get_one::<String>("output").cloned();

        let action = if let Some(name) = args.get_one::<String>("get-tag") {
            TagAction::Get(name.clone())
        } else if let Some(assignment) = args.get_one::<String>("set-tag") {
            let (name, value) = assignment.split_once('=').ok_or_else(|| {
                ExifError::GenericError(format!(
                    "--set-tag expects NAME=VALUE, got <{}>",
                    assignment
                ))
            })?;
            TagAction::Set { name: name.to_string(), value: value.to_string() }
        } else if let Some(name) = args.get_one::<String>("delete-tag") {
            TagAction::Delete(name.clone())
        } else {
            return Err(ExifError::GenericError("No tag operation requested".to_string()));
        };

        Ok(TagCommand { input_file, output_file, action, logger })
    }

    fn output_file(&self) -> ExifResult<&str> {
        self.output_file.as_deref().ok_or_else(|| {
            ExifError::GenericError("--output is required when modifying tags".to_string())
        })
    }
}

impl<'a> Command for TagCommand<'a> {
    fn execute(&self) -> ExifResult<()> {
        let mut jpeg = JpegFile::from_file(&self.input_file)?;

        match &self.action {
            TagAction::Get(name) => {
                match jpeg.get_tag(name)? {
                    Some(value) => println!("{}", value),
                    None => println!("{} is not set", name),
                }
            }
            TagAction::Set { name, value } => {
                info!("Setting {} = {} in {}", name, value, self.input_file);
                self.logger.log(&format!("Setting {} = {}", name, value))?;
                jpeg.set_tag(name, value)?;
                jpeg.write_file(self.output_file()?)?;
            }
            TagAction::Delete(name) => {
                info!("Deleting {} from {}", name, self.input_file);
                self.logger.log(&format!("Deleting {}", name))?;
                jpeg.delete_tag(name)?;
                jpeg.write_file(self.output_file()?)?;
            }
        }
        Ok(())
    }
}
