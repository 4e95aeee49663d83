//! Logging Module
//!
//! Leveled loggers passed explicitly into generation runs.

mod console_logger;
mod logger;

pub use console_logger::{ConsoleLogger, RecordingLogger};
pub use logger::{LogLevel, Logger, NullLogger};
