//! Observability sinks for rendered diagnostic lines.
//!
//! Every line the adapter renders goes through a single [`LogSink`]. Backends:
//!
//! | Backend | Description |
//! |---------|-------------|
//! | [`TracingSink`] | Emits each line as a `tracing` event at the matching level |
//! | [`ConsoleSink`] | Writes each line to stdout/stderr and flushes immediately |
//! | [`MemorySink`]  | Captures records in memory |
//! | [`MultiSink`]   | Fan-out to several backends, flushing each per record |
//! | [`NoopSink`]    | Discards everything |
//!
//! The usual setup pairs the tracing and console backends so that output stays
//! visible whatever the subscriber configuration:
//!
//! ```rust
//! use std::sync::Arc;
//! use meshlog::sink::{ConsoleSink, LogLevel, LogSink, MultiSink, TracingSink};
//!
//! let sink = MultiSink::new(vec![Arc::new(TracingSink), Arc::new(ConsoleSink::stdout())]);
//! sink.emit(LogLevel::Info, "gateway ready");
//! ```

mod console;
mod memory;
mod multi;
mod noop;
mod tracing_sink;

use std::fmt;
use std::sync::Arc;

pub use console::{ConsoleSink, ConsoleStream};
pub use memory::{LogRecord, MemorySink};
pub use multi::MultiSink;
pub use noop::NoopSink;
pub use tracing_sink::TracingSink;

/// A shared, thread-safe [`LogSink`] trait object.
pub type SharedSink = Arc<dyn LogSink>;

/// Severity of a rendered line.
///
/// Maps directly to `tracing` levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Trace-level logging (most verbose).
    Trace,
    /// Debug-level logging.
    Debug,
    /// Info-level logging (default).
    #[default]
    Info,
    /// Warn-level logging.
    Warn,
    /// Error-level logging.
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        })
    }
}

/// Emit a `tracing` event at the given [`LogLevel`].
macro_rules! log_at_level {
    ($level:expr, $($arg:tt)*) => {
        match $level {
            $crate::sink::LogLevel::Trace => tracing::trace!($($arg)*),
            $crate::sink::LogLevel::Debug => tracing::debug!($($arg)*),
            $crate::sink::LogLevel::Info  => tracing::info!($($arg)*),
            $crate::sink::LogLevel::Warn  => tracing::warn!($($arg)*),
            $crate::sink::LogLevel::Error => tracing::error!($($arg)*),
        }
    };
}

pub(crate) use log_at_level;

/// A destination for already-formatted, single-line records.
///
/// Emitting never fails: a backend that cannot write drops the record.
pub trait LogSink: Send + Sync + fmt::Debug {
    /// Record one line. `line` must not contain a newline.
    fn emit(&self, level: LogLevel, line: &str);

    /// Push buffered records to their destination.
    fn flush(&self) {}

    /// Record multi-line text, one record per line.
    ///
    /// Lines break at `\n`, `\r\n` and a lone `\r`. The first line is prefixed
    /// by `prefix`; continuation lines are indented by as many spaces as
    /// `prefix` has characters. Empty text still produces one record
    /// containing just the prefix.
    fn emit_block(&self, level: LogLevel, prefix: &str, text: &str) {
        let mut lines = text.lines().flat_map(|line| line.split('\r'));
        let Some(first) = lines.next() else {
            self.emit(level, prefix);
            return;
        };
        self.emit(level, &format!("{prefix}{first}"));

        let hanging = " ".repeat(prefix.chars().count());
        for line in lines {
            self.emit(level, &format!("{hanging}{line}"));
        }
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn emit(&self, level: LogLevel, line: &str) {
        (**self).emit(level, line);
    }

    fn flush(&self) {
        (**self).flush();
    }

    fn emit_block(&self, level: LogLevel, prefix: &str, text: &str) {
        (**self).emit_block(level, prefix, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod log_level {
        use super::*;

        #[test]
        fn default_is_info() {
            assert_eq!(LogLevel::default(), LogLevel::Info);
        }

        #[test]
        fn ordered_by_severity() {
            assert!(LogLevel::Trace < LogLevel::Debug);
            assert!(LogLevel::Info < LogLevel::Error);
            assert!(LogLevel::Warn < LogLevel::Error);
        }

        #[test]
        fn display_is_uppercase() {
            assert_eq!(LogLevel::Error.to_string(), "ERROR");
            assert_eq!(LogLevel::Info.to_string(), "INFO");
        }

        #[test]
        fn macro_covers_every_level() {
            for level in [
                LogLevel::Trace,
                LogLevel::Debug,
                LogLevel::Info,
                LogLevel::Warn,
                LogLevel::Error,
            ] {
                log_at_level!(level, line = "sample", "every level");
            }
        }
    }

    mod emit_block {
        use super::*;

        #[test]
        fn splits_lines_and_prefixes() {
            let sink = MemorySink::new();
            sink.emit_block(LogLevel::Info, "  ", "{\n  \"a\": 1\n}");
            assert_eq!(sink.lines(), vec!["  {", "    \"a\": 1", "  }"]);
        }

        #[test]
        fn continuation_lines_hang_under_prefix() {
            let sink = MemorySink::new();
            sink.emit_block(LogLevel::Info, "  - ", "[\n  1\n]");
            assert_eq!(sink.lines(), vec!["  - [", "      1", "    ]"]);
        }

        #[test]
        fn empty_text_emits_prefix() {
            let sink = MemorySink::new();
            sink.emit_block(LogLevel::Warn, "key: ", "");
            assert_eq!(sink.lines(), vec!["key: "]);
            assert_eq!(sink.records()[0].level, LogLevel::Warn);
        }

        #[test]
        fn lone_carriage_returns_split_records() {
            let sink = MemorySink::new();
            sink.emit_block(LogLevel::Info, "> ", "a\rb\r\nc");
            assert_eq!(sink.lines(), vec!["> a", "  b", "  c"]);
            assert!(sink.lines().iter().all(|l| !l.contains('\r')));
        }

        #[test]
        fn shared_sink_keeps_backend_override() {
            /// Backend that renders a block as one joined record.
            #[derive(Debug, Default)]
            struct Joining {
                inner: MemorySink,
            }

            impl LogSink for Joining {
                fn emit(&self, level: LogLevel, line: &str) {
                    self.inner.emit(level, line);
                }

                fn emit_block(&self, level: LogLevel, prefix: &str, text: &str) {
                    self.inner.emit(level, &format!("{prefix}{}", text.replace('\n', " | ")));
                }
            }

            let backend = Arc::new(Joining::default());
            let shared: SharedSink = backend.clone();
            shared.emit_block(LogLevel::Info, "- ", "one\ntwo");
            backend.clone().emit_block(LogLevel::Info, "- ", "three\nfour");

            assert_eq!(backend.inner.lines(), vec!["- one | two", "- three | four"]);
        }

        #[test]
        fn works_through_shared_sink() {
            let memory = Arc::new(MemorySink::new());
            let shared: SharedSink = memory.clone();
            shared.emit_block(LogLevel::Info, "", "one\ntwo");
            assert_eq!(memory.lines(), vec!["one", "two"]);
        }
    }
}
