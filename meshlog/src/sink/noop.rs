//! No-op sink.

use super::{LogLevel, LogSink};

/// A sink that discards every record.
///
/// Used when both the tracing and the console backends are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn emit(&self, _level: LogLevel, _line: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_zero_sized() {
        assert_eq!(std::mem::size_of::<NoopSink>(), 0);
    }

    #[test]
    fn emit_block_does_nothing() {
        NoopSink.emit_block(LogLevel::Error, "  ", "a\nb");
        NoopSink.flush();
    }
}
