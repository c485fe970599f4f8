//! JSON and JSON Lines posting sinks

use crate::config::OutputFormat;
use crate::listing::JobPosting;
use crate::output::traits::OutputSink;
use crate::OutputResult;
use std::io::Write;

/// Serializes postings to any writer
///
/// `Json` streams a single array, `Jsonl` writes one object per line.
pub struct JsonSink<W: Write> {
    writer: W,
    format: OutputFormat,
    written: usize,
    finished: bool,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            written: 0,
            finished: false,
        }
    }

    /// Number of postings written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for JsonSink<W> {
    fn write_posting(&mut self, posting: &JobPosting) -> OutputResult<()> {
        match self.format {
            OutputFormat::Json => {
                let separator = if self.written == 0 { "[\n  " } else { ",\n  " };
                self.writer.write_all(separator.as_bytes())?;
                serde_json::to_writer(&mut self.writer, posting)?;
            }
            OutputFormat::Jsonl => {
                serde_json::to_writer(&mut self.writer, posting)?;
                self.writer.write_all(b"\n")?;
            }
        }

        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }

        if self.format == OutputFormat::Json {
            let closing: &[u8] = if self.written == 0 { b"[]\n" } else { b"\n]\n" };
            self.writer.write_all(closing)?;
        }

        self.writer.flush()?;
        self.finished = true;
        Ok(())
    }
}
