//! Output sinks: where emitted summary lines are delivered

use crate::common::Result;
use std::io::Write;

/// Destination for emitted lines.
pub trait OutputSink {
    /// Deliver one line (without trailing newline).
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Flush buffered output, if any.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl OutputSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Sink writing newline-terminated lines to any `io::Write`.
#[derive(Debug)]
pub struct IoSink<W: Write> {
    writer: W,
    lines_written: u64,
}

impl<W: Write> IoSink<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines_written: 0,
        }
    }

    /// Number of lines delivered so far.
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for IoSink<W> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
