//! Progress and error reporting.
//!
//! The pipeline never prints directly; it hands [`LogEntry`] values to a
//! [`Reporter`]. The CLI uses [`ConsoleReporter`], tests use
//! [`MemoryReporter`] or [`SilentReporter`].

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional indentation level (for nested logs)
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }
}

/// Receives log entries from the pipeline.
pub trait Reporter {
    fn log(&self, entry: LogEntry);

    fn info(&self, msg: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogEntry::info(msg));
    }

    fn success(&self, msg: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogEntry::success(msg));
    }

    fn warning(&self, msg: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogEntry::warning(msg));
    }

    fn error(&self, msg: impl Into<String>)
    where
        Self: Sized,
    {
        self.log(LogEntry::error(msg));
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn log(&self, entry: LogEntry) {
        (**self).log(entry);
    }
}

/// Prints entries to the terminal. Errors go to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn log(&self, entry: LogEntry) {
        let prefix = match entry.level {
            LogLevel::Info => "",
            LogLevel::Success => "→ ",
            LogLevel::Warning => "⚠ ",
            LogLevel::Error => "✗ ",
        };
        let indent = "  ".repeat(entry.indent as usize);

        match entry.level {
            LogLevel::Error => eprintln!("{}{}{}", indent, prefix, entry.message),
            _ => println!("{}{}{}", indent, prefix, entry.message),
        }
    }
}

/// Drops every entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn log(&self, _entry: LogEntry) {}
}

/// Keeps every entry in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Messages logged at `level`.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn log(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}
