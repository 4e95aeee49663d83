// Console Logger
//
// Loggers that write to the console or keep records in memory.

use super::logger::{LogLevel, Logger};
use std::sync::Mutex;

/// Console logger.
///
/// Every level goes to stderr; stdout is reserved for generated output.
pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    fn emit(&self, level: LogLevel, msg: &str) {
        if self.is_enabled(level) {
            let tag = level.to_string().to_ascii_uppercase();
            eprintln!("[{}] {}", tag, msg);
        }
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        self.emit(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.emit(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.emit(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.emit(LogLevel::Error, msg);
    }
}

/// Logger that keeps every enabled message, for inspection in tests.
pub struct RecordingLogger {
    level: LogLevel,
    records: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<(LogLevel, String)> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, level: LogLevel, msg: &str) {
        if !self.is_enabled(level) {
            return;
        }
        let mut records = match self.records.lock() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.push((level, msg.to_string()));
    }
}

impl Logger for RecordingLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        self.record(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.record(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.record(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.record(LogLevel::Error, msg);
    }
}
