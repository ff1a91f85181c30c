//! Direct console output, flushed after every record.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::{LogLevel, LogSink};

/// Standard stream targeted by a [`ConsoleSink`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleStream {
    /// Standard output (default).
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
}

enum Target {
    Stream(ConsoleStream),
    Writer(Mutex<Box<dyn Write + Send>>),
}

/// Sink that writes each line verbatim and flushes immediately.
///
/// The level is not printed; the line is exactly what the tracing backend
/// receives. Write failures are ignored.
pub struct ConsoleSink {
    target: Target,
}

impl fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match &self.target {
            Target::Stream(stream) => format!("{stream:?}"),
            Target::Writer(_) => "Writer".to_owned(),
        };
        f.debug_struct("ConsoleSink")
            .field("target", &target)
            .finish()
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl ConsoleSink {
    /// Console sink writing to standard output.
    #[must_use]
    pub const fn stdout() -> Self {
        Self::stream(ConsoleStream::Stdout)
    }

    /// Console sink writing to standard error.
    #[must_use]
    pub const fn stderr() -> Self {
        Self::stream(ConsoleStream::Stderr)
    }

    /// Console sink writing to the given standard stream.
    #[must_use]
    pub const fn stream(stream: ConsoleStream) -> Self {
        Self {
            target: Target::Stream(stream),
        }
    }

    /// Console sink writing to an arbitrary writer.
    #[must_use]
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            target: Target::Writer(Mutex::new(Box::new(writer))),
        }
    }
}

fn write_line(out: &mut dyn Write, line: &str) -> io::Result<()> {
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

impl LogSink for ConsoleSink {
    fn emit(&self, _level: LogLevel, line: &str) {
        let _ = match &self.target {
            Target::Stream(ConsoleStream::Stdout) => write_line(&mut io::stdout().lock(), line),
            Target::Stream(ConsoleStream::Stderr) => write_line(&mut io::stderr().lock(), line),
            Target::Writer(writer) => {
                let mut guard = writer.lock().unwrap_or_else(PoisonError::into_inner);
                write_line(&mut **guard, line)
            }
        };
    }

    fn flush(&self) {
        let _ = match &self.target {
            Target::Stream(ConsoleStream::Stdout) => io::stdout().flush(),
            Target::Stream(ConsoleStream::Stderr) => io::stderr().flush(),
            Target::Writer(writer) => writer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .flush(),
        };
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Writer that records bytes and counts flushes.
    #[derive(Debug, Clone, Default)]
    struct Recorder {
        buf: Arc<Mutex<Vec<u8>>>,
        flushes: Arc<AtomicUsize>,
    }

    impl Recorder {
        fn text(&self) -> String {
            String::from_utf8(self.buf.lock().unwrap().clone()).unwrap()
        }

        fn flushes(&self) -> usize {
            self.flushes.load(Ordering::SeqCst)
        }
    }

    impl Write for Recorder {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.buf.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Writer that always fails.
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _data: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn writes_one_line_per_record() {
        let recorder = Recorder::default();
        let sink = ConsoleSink::writer(recorder.clone());
        sink.emit(LogLevel::Info, "first");
        sink.emit(LogLevel::Error, "second");
        assert_eq!(recorder.text(), "first\nsecond\n");
    }

    #[test]
    fn flushes_after_every_record() {
        let recorder = Recorder::default();
        let sink = ConsoleSink::writer(recorder.clone());
        sink.emit(LogLevel::Info, "a");
        sink.emit(LogLevel::Info, "b");
        assert_eq!(recorder.flushes(), 2);
    }

    #[test]
    fn write_errors_are_swallowed() {
        let sink = ConsoleSink::writer(Broken);
        sink.emit(LogLevel::Info, "lost");
        sink.flush();
    }

    #[test]
    fn standard_streams_do_not_panic() {
        ConsoleSink::stdout().emit(LogLevel::Info, "console sink stdout sample");
        ConsoleSink::stderr().emit(LogLevel::Error, "console sink stderr sample");
    }

    #[test]
    fn default_is_stdout() {
        let debug = format!("{:?}", ConsoleSink::default());
        assert!(debug.contains("Stdout"));
    }

    #[test]
    fn stream_deserializes_lowercase() {
        let stream: ConsoleStream = serde_json::from_str("\"stderr\"").unwrap();
        assert_eq!(stream, ConsoleStream::Stderr);
    }
}
