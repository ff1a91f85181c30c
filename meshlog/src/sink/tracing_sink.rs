//! Sink backed by the `tracing` crate.

use super::{LogLevel, LogSink, log_at_level};

/// A [`LogSink`] that emits each line as a `tracing` event.
///
/// Events carry no structured fields; the line is the message. Whether they are
/// shown depends on the installed subscriber and its filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, level: LogLevel, line: &str) {
        log_at_level!(level, "{line}");
    }
}
