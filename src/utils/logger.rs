//! Logger utility for application-wide logging
//!
//! A small logger that works alongside the standard log crate facade,
//! writing records to a log file and echoing them to the console. The
//! CLI wires this up unless the user opted into env_logger via
//! RUST_LOG.

use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// File-backed logger implementation
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level this logger lets through
    level: LevelFilter,
}

impl Logger {
    /// Creates a new logger writing to the given file
    pub fn new(log_file: &str) -> io::Result<Self> {
        let file = File::create(log_file)?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level: LevelFilter::Info,
        })
    }

    /// Appends one message line to the log file
    pub fn log(&self, message: &str) -> io::Result<()> {
        if let Some(file) = &mut *self.file.lock().unwrap() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Installs a Logger as the process-wide log sink
    ///
    /// `verbose` raises the captured level from Info to Debug, which
    /// is what the CLI's --verbose flag toggles.
    pub fn init_global_logger(log_file: &str, verbose: bool) -> io::Result<()> {
        let mut logger = Logger::new(log_file)?;
        let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
        logger.level = level;

        // Ignore the SetLoggerError: this is only called once at startup
        if log::set_boxed_logger(Box::new(logger)).is_err() {
            eprintln!("Warning: global logger was already initialized");
        }
        log::set_max_level(level);
        Ok(())
    }
}

// Implement the Log trait so the Logger works with the log crate macros
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.log(&message);

            if record.level() <= Level::Warn {
                eprintln!("{}", message);
            }
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}
