//! Fan-out sink that dispatches to multiple backends.

use super::{LogLevel, LogSink, SharedSink};

/// Dispatches every record to all inner sinks.
///
/// Each backend receives the record and is flushed before the next backend
/// is called, so one slow or buffered backend cannot hold back another.
/// An empty fan-out behaves like [`NoopSink`](super::NoopSink).
#[derive(Debug, Default, Clone)]
pub struct MultiSink {
    sinks: Vec<SharedSink>,
}

impl MultiSink {
    /// Create from a list of sinks.
    #[must_use]
    pub fn new(sinks: Vec<SharedSink>) -> Self {
        Self { sinks }
    }

    /// Register another backend.
    pub fn push(&mut self, sink: SharedSink) {
        self.sinks.push(sink);
    }

    /// Register another backend, builder style.
    #[must_use]
    pub fn with(mut self, sink: SharedSink) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Number of registered backends.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether no backend is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl LogSink for MultiSink {
    fn emit(&self, level: LogLevel, line: &str) {
        for sink in &self.sinks {
            sink.emit(level, line);
            sink.flush();
        }
    }

    fn flush(&self) {
        for sink in &self.sinks {
            sink.flush();
        }
    }
}
