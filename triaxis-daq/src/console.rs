//! Operator console
//!
//! Renders core events and the final summary as plain lines. Diagnostics go
//! through `tracing` to stderr; this is the program's actual output and goes
//! to stdout.

use std::io::{self, Write};

use serde::Serialize;
use triaxis_core::{AcquisitionError, CircularBuffer, Event, SessionStatistics};

/// Placeholder printed when a session ends without samples
pub const NO_DATA_LINE: &str = "No data collected for statistics.";

/// Line-oriented report writer
#[derive(Debug)]
pub struct Console<W: Write> {
    out: W,
}

impl Console<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// One event, one line
    pub fn event(&mut self, event: &Event) -> io::Result<()> {
        writeln!(self.out, "{event}")
    }

    /// The window, oldest first, as `[slot] X: .., Y: .., Z: ..`
    pub fn buffer_dump(&mut self, buffer: &CircularBuffer) -> io::Result<()> {
        writeln!(
            self.out,
            "Current Buffer State ({}/{}):",
            buffer.len(),
            buffer.capacity()
        )?;
        for (slot, sample) in buffer.slots() {
            writeln!(self.out, "[{slot}] {sample}")?;
        }
        Ok(())
    }

    /// Final statistics, or the no-data placeholder
    pub fn summary(&mut self, stats: &Result<SessionStatistics, AcquisitionError>) -> io::Result<()> {
        match stats {
            Ok(stats) => writeln!(self.out, "{stats}"),
            Err(AcquisitionError::NoData) => writeln!(self.out, "{NO_DATA_LINE}"),
            Err(other) => writeln!(self.out, "Statistics unavailable: {other}"),
        }
    }

    /// Final statistics as a single JSON object
    pub fn summary_json(&mut self, stats: &Result<SessionStatistics, AcquisitionError>) -> io::Result<()> {
        let line = match stats {
            Ok(stats) => serde_json::to_string(&JsonSummary::from(stats)),
            Err(_) => serde_json::to_string(&JsonSummary::empty()),
        }
        .map_err(io::Error::from)?;
        writeln!(self.out, "{line}")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// JSON shape of the final summary
#[derive(Debug, Serialize)]
struct JsonSummary<'a> {
    count: u64,
    statistics: Option<&'a SessionStatistics>,
}

impl<'a> JsonSummary<'a> {
    fn empty() -> Self {
        Self {
            count: 0,
            statistics: None,
        }
    }
}

impl<'a> From<&'a SessionStatistics> for JsonSummary<'a> {
    fn from(stats: &'a SessionStatistics) -> Self {
        Self {
            count: stats.count,
            statistics: Some(stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triaxis_core::{AxisSet, AxisStatistics, Sample};

    fn rendered(f: impl FnOnce(&mut Console<Vec<u8>>) -> io::Result<()>) -> String {
        let mut console = Console::new(Vec::new());
        f(&mut console).unwrap();
        String::from_utf8(console.into_inner()).unwrap()
    }

    fn stats() -> SessionStatistics {
        SessionStatistics {
            count: 3,
            x: AxisStatistics { mean: 2.0, std_dev: 0.5 },
            y: AxisStatistics { mean: 0.0, std_dev: 0.0 },
            z: AxisStatistics { mean: -1.0, std_dev: 0.25 },
        }
    }

    #[test]
    fn buffer_dump_lists_oldest_first() {
        let mut buffer = CircularBuffer::with_capacity(2).unwrap();
        buffer.push(Sample::new(0.1, 0.1, 0.1));
        buffer.push(Sample::new(0.2, 0.2, 0.2));
        buffer.push(Sample::new(0.3, 0.3, 0.3));

        let out = rendered(|c| c.buffer_dump(&buffer));
        assert_eq!(
            out,
            "Current Buffer State (2/2):\n\
             [1] X: 0.20, Y: 0.20, Z: 0.20\n\
             [0] X: 0.30, Y: 0.30, Z: 0.30\n"
        );
    }

    #[test]
    fn summary_lines() {
        let out = rendered(|c| c.summary(&Ok(stats())));
        assert!(out.starts_with("Statistics - Mean: X: 2.00, Y: 0.00, Z: -1.00"));

        let out = rendered(|c| c.summary(&Err(AcquisitionError::NoData)));
        assert_eq!(out, "No data collected for statistics.\n");
    }

    #[test]
    fn json_summary() {
        let out = rendered(|c| c.summary_json(&Ok(stats())));
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["count"], 3);
        assert_eq!(value["statistics"]["x"]["mean"], 2.0);
        assert_eq!(value["statistics"]["z"]["std_dev"], 0.25);

        let out = rendered(|c| c.summary_json(&Err(AcquisitionError::NoData)));
        assert_eq!(out.trim(), r#"{"count":0,"statistics":null}"#);
    }

    #[test]
    fn events_serialise_with_their_kind() {
        let event = Event::ThresholdExceeded {
            tick: 4,
            sample: Sample::new(0.5, 0.25, 1.0),
            limit: 0.75,
            axes: AxisSet::all(),
        };

        let value = serde_json::to_value(event).unwrap();
        assert_eq!(value["kind"], event.kind());
        assert_eq!(value["tick"], 4);
        assert_eq!(value["sample"]["z"], 1.0);
        assert_eq!(value["limit"], 0.75);

        let back: Event = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn events_render_one_per_line() {
        let out = rendered(|c| c.event(&Event::SessionStop { ticks: 5 }));
        assert_eq!(out, "Session stopped after 5 samples\n");
    }
}
