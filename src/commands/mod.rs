//! CLI command implementations
//!
//! This module contains implementations of the commands supported by
//! the CLI application using the Command pattern.

pub mod analyze_command;
pub mod command_traits;
pub mod gps_command;
pub mod import_command;
pub mod strip_command;
pub mod tag_command;

pub use analyze_command::AnalyzeCommand;
pub use command_traits::{Command, CommandFactory};
pub use gps_command::GpsCommand;
pub use import_command::ImportCommand;
pub use strip_command::StripCommand;
pub use tag_command::TagCommand;

use clap::ArgMatches;

use crate::exif::errors::ExifResult;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates the
/// appropriate command instance for execution.
pub struct ExifkitCommandFactory;

impl ExifkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        ExifkitCommandFactory
    }
}

impl Default for ExifkitCommandFactory {
    fn default() -> Self {
        ExifkitCommandFactory::new()
    }
}

impl<'a> CommandFactory<'a> for ExifkitCommandFactory {
    fn create_command(
        &self,
        args: &ArgMatches,
        logger: &'a Logger,
    ) -> ExifResult<Box<dyn Command + 'a>> {
        // Determine which command to run based on args
        if args.contains_id("import-exif") {
            Ok(Box::new(ImportCommand::new(args, logger)?))
        } else if args.get_flag("strip") {
            Ok(Box::new(StripCommand::new(args, logger)?))
        } else if args.contains_id("gps") || args.get_flag("show-gps") {
            Ok(Box::new(GpsCommand::new(args, logger)?))
        } else if args.contains_id("get-tag")
            || args.contains_id("set-tag")
            || args.contains_id("delete-tag")
        {
            Ok(Box::new(TagCommand::new(args, logger)?))
        } else {
            // Default to the structural dump
            Ok(Box::new(AnalyzeCommand::new(args, logger)?))
        }
    }
}
