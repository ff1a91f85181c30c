//! In-memory sink that captures every record.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{LogLevel, LogSink};

/// A captured line together with its level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity the line was emitted at.
    pub level: LogLevel,
    /// The line itself.
    pub line: String,
}

/// Sink that keeps every record in memory, in emission order.
///
/// # Example
///
/// ```rust
/// use meshlog::sink::{LogLevel, LogSink, MemorySink};
///
/// let sink = MemorySink::new();
/// sink.emit(LogLevel::Info, "hello");
/// assert!(sink.contains("hello"));
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    /// Create an empty memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.guard().clone()
    }

    /// Snapshot of all captured lines, without levels.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.guard().iter().map(|r| r.line.clone()).collect()
    }

    /// Whether any captured line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.guard().iter().any(|r| r.line.contains(needle))
    }

    /// Number of captured records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// Whether nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Drop all captured records.
    pub fn clear(&self) {
        self.guard().clear();
    }
}

impl LogSink for MemorySink {
    fn emit(&self, level: LogLevel, line: &str) {
        self.guard().push(LogRecord {
            level,
            line: line.to_owned(),
        });
    }
}
