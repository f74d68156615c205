//! CSV sample log
//!
//! ## Format
//!
//! ```csv
//! Timestamp,X,Y,Z
//! 2026-10-17 14:03:22,0.12,-0.40,0.93
//! ```
//!
//! or, without timestamps:
//!
//! ```csv
//! X,Y,Z
//! 0.12,-0.40,0.93
//! ```
//!
//! Values are written with two decimals. Timestamps are local time. The file
//! is truncated when the log is opened and written through a `BufWriter`;
//! call `flush()` (the runner does, at shutdown) to make sure everything
//! reached the disk.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{Local, TimeZone};
use triaxis_core::time::Timestamp;
use triaxis_core::{Sample, SampleSink};

use crate::errors::{DaqError, Result};

/// Layout of the timestamp column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Counters for the sample log
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SinkStats {
    /// Rows written successfully, header excluded
    pub samples_written: u64,
    /// Failed writes and flushes
    pub write_errors: u64,
}

/// Comma-separated sample log over any writer
#[derive(Debug)]
pub struct CsvSampleLog<W: Write> {
    writer: W,
    timestamps: bool,
    stats: SinkStats,
}

impl CsvSampleLog<BufWriter<File>> {
    /// Create (or truncate) the log file at `path`
    pub fn create(path: impl AsRef<Path>, timestamps: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| DaqError::ResourceAcquisition {
            resource: "log file",
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), timestamps, "opened sample log");
        Ok(Self::new(BufWriter::new(file), timestamps))
    }
}

impl<W: Write> CsvSampleLog<W> {
    pub fn new(writer: W, timestamps: bool) -> Self {
        Self {
            writer,
            timestamps,
            stats: SinkStats::default(),
        }
    }

    pub fn timestamps(&self) -> bool {
        self.timestamps
    }

    pub fn stats(&self) -> &SinkStats {
        &self.stats
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwrap the writer, for tests and in-memory logs
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn track<T>(&mut self, result: io::Result<T>) -> io::Result<T> {
        if result.is_err() {
            self.stats.write_errors += 1;
        }
        result
    }
}

/// Local-time rendering of a millisecond timestamp
pub fn format_timestamp(timestamp: Timestamp) -> String {
    let millis = i64::try_from(timestamp).unwrap_or(i64::MAX);
    match Local.timestamp_millis_opt(millis).earliest() {
        Some(time) => time.format(TIMESTAMP_FORMAT).to_string(),
        None => String::from("1970-01-01 00:00:00"),
    }
}

impl<W: Write> SampleSink for CsvSampleLog<W> {
    type Error = io::Error;

    fn write_header(&mut self) -> io::Result<()> {
        let header = if self.timestamps { "Timestamp,X,Y,Z" } else { "X,Y,Z" };
        let result = writeln!(self.writer, "{header}");
        self.track(result)
    }

    fn write_sample(&mut self, sample: &Sample, timestamp: Timestamp) -> io::Result<()> {
        let result = if self.timestamps {
            writeln!(
                self.writer,
                "{},{:.2},{:.2},{:.2}",
                format_timestamp(timestamp),
                sample.x,
                sample.y,
                sample.z
            )
        } else {
            writeln!(self.writer, "{:.2},{:.2},{:.2}", sample.x, sample.y, sample.z)
        };

        let result = self.track(result);
        if result.is_ok() {
            self.stats.samples_written += 1;
        }
        result
    }

    fn flush(&mut self) -> io::Result<()> {
        let result = self.writer.flush();
        self.track(result)
    }
}
