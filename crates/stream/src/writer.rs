//! JSONL emission writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use hueshift_common::error::{HueshiftError, HueshiftResult};
use hueshift_processing_core::HueEmission;

use crate::HueSink;

/// Flush after this many lines.
const FLUSH_EVERY: u64 = 100;

#[derive(Serialize)]
struct EmissionRecord<'a> {
    t: u64,
    parameter: &'a str,
    value: f64,
    raw: f64,
    dominant: &'a str,
}

/// Writes one emission per line:
/// `{"t":1000,"parameter":"HueShift","value":0.19,"raw":0.19,"dominant":"happy"}`.
pub struct EmissionWriter<W: Write> {
    writer: BufWriter<W>,
    parameter: String,
    lines_written: u64,
}

impl EmissionWriter<File> {
    /// Create (or truncate) a file, creating parent directories.
    pub fn create(path: impl AsRef<Path>, parameter: impl Into<String>) -> HueshiftResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self::new(file, parameter))
    }
}

impl<W: Write> EmissionWriter<W> {
    pub fn new(inner: W, parameter: impl Into<String>) -> Self {
        Self {
            writer: BufWriter::new(inner),
            parameter: parameter.into(),
            lines_written: 0,
        }
    }

    pub fn write_emission(&mut self, emission: &HueEmission) -> HueshiftResult<()> {
        let record = EmissionRecord {
            t: emission.timestamp_ms,
            parameter: &self.parameter,
            value: emission.hue,
            raw: emission.raw_hue,
            dominant: &emission.dominant,
        };
        let json = serde_json::to_string(&record)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| HueshiftError::sink(format!("Failed to write emission: {e}")))?;
        self.lines_written += 1;

        if self.lines_written % FLUSH_EVERY == 0 {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> HueshiftResult<()> {
        self.writer
            .flush()
            .map_err(|e| HueshiftError::sink(format!("Failed to flush emissions: {e}")))
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Name stamped on every record.
    pub fn parameter(&self) -> &str {
        &self.parameter
    }
}

impl<W: Write> Drop for EmissionWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<W: Write + Send> HueSink for EmissionWriter<W> {
    fn send(&mut self, emission: &HueEmission) -> HueshiftResult<()> {
        self.write_emission(emission)
    }

    fn flush(&mut self) -> HueshiftResult<()> {
        EmissionWriter::flush(self)
    }

    fn name(&self) -> &str {
        "jsonl"
    }
}
