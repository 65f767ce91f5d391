//! GPS coordinate command
//!
//! Shows or sets the GPS location stored in a photo's EXIF metadata.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::exif::errors::{ExifError, ExifResult};
use crate::jpeg::JpegFile;
use crate::utils::logger::Logger;

/// Command for reading or writing the GPS location
pub struct GpsCommand<'a> {
    input_file: String,
    output_file: Option<String>,
    /// Coordinate to write, absent when only showing
    coordinate: Option<(f64, f64)>,
    logger: &'a Logger,
}

impl<'a> GpsCommand<'a> {
    /// Create a new GPS command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ExifResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| ExifError::GenericError("Missing input file".to_string()))?
            .clone();
        let output_file = args.get_one::<String>("output").cloned();

        let coordinate = match args.get_one::<String>("gps") {
            Some(text) => Some(Self::parse_coordinate(text)?),
            None => None,
        };

        Ok(GpsCommand { input_file, output_file, coordinate, logger })
    }

    /// Parses a "lat,lng" pair of decimal degrees
    fn parse_coordinate(text: &str) -> ExifResult<(f64, f64)> {
        let (lat, lng) = text.split_once(',').ok_or_else(|| {
            ExifError::GenericError(format!("--gps expects LAT,LNG, got <{}>", text))
        })?;
        let lat = lat.trim().parse::<f64>().map_err(|_| {
            ExifError::GenericError(format!("invalid latitude <{}>", lat.trim()))
        })?;
        let lng = lng.trim().parse::<f64>().map_err(|_| {
            ExifError::GenericError(format!("invalid longitude <{}>", lng.trim()))
        })?;
        Ok((lat, lng))
    }
}

impl<'a> Command for GpsCommand<'a> {
    fn execute(&self) -> ExifResult<()> {
        match self.coordinate {
            Some((lat, lng)) => {
                let output = self.output_file.as_deref().ok_or_else(|| {
                    ExifError::GenericError(
                        "--output is required when setting the GPS location".to_string(),
                    )
                })?;
                info!("Setting GPS location of {} to ({}, {})", self.input_file, lat, lng);
                self.logger.log(&format!("Setting GPS location to ({}, {})", lat, lng))?;

                let mut jpeg = JpegFile::from_file(&self.input_file)?;
                jpeg.set_geo(lat, lng)?;
                jpeg.write_file(output)?;
            }
            None => {
                let jpeg = JpegFile::from_file(&self.input_file)?;
                let (lat, lng) = jpeg.get_geo()?;
                println!("({}, {})", lat, lng);
            }
        }
        Ok(())
    }
}
