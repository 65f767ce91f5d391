use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

// Import from your library
use exifkit::commands::{CommandFactory, ExifkitCommandFactory};
use exifkit::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("ExifKit")
        .version("0.1")
        .about("Analyze and edit JPEG/EXIF file structure")
        .arg(
            Arg::new("input")
                .help("Input JPEG file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output JPEG file for modifying operations")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("get-tag")
                .long("get-tag")
                .help("Print a tag value by name (e.g. Make, DateTimeOriginal, 0x010f)")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("set-tag")
                .long("set-tag")
                .help("Set a tag by name (NAME=VALUE)")
                .value_name("NAME=VALUE")
                .required(false),
        )
        .arg(
            Arg::new("delete-tag")
                .long("delete-tag")
                .help("Remove a tag by name")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("show-gps")
                .long("show-gps")
                .help("Print the GPS location as decimal degrees")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("gps")
                .long("gps")
                .help("Set the GPS location (LAT,LNG in decimal degrees)")
                .value_name("LAT,LNG")
                .required(false),
        )
        .arg(
            Arg::new("strip")
                .short('s')
                .long("strip")
                .help("Remove metadata segments")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("paranoid")
                .long("paranoid")
                .help("With --strip, also remove segments whose purpose is unrecognized")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("import-exif")
                .long("import-exif")
                .help("Import the EXIF segment from another JPEG file")
                .value_name("FILE")
                .required(false),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");

    // RUST_LOG selects env_logger; otherwise log to a file alongside
    // the console like the rest of the tooling expects.
    if std::env::var_os("RUST_LOG").is_some() {
        env_logger::init();
    } else if let Err(e) = Logger::init_global_logger("exifkit.log", verbose) {
        eprintln!("Error setting up logger: {}", e);
        process::exit(1);
    }

    let logger = match Logger::new("exifkit-commands.log") {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    let factory = ExifkitCommandFactory::new();

    match factory.create_command(&matches, &logger) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
