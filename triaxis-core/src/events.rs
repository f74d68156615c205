//! Event Types for the Acquisition Loop
//!
//! ## Overview
//!
//! The core never prints. Everything worth telling the operator about a tick
//! is expressed as an `Event`, and the application decides how to render it
//! (console, log, tests collecting into a `Vec`).
//!
//! ## Event Flow
//!
//! ```text
//! SessionStart
//!   ├── SampleBuffered      ┐
//!   ├── WindowAverage       ├── once per tick, in this order
//!   ├── ThresholdExceeded   ┘   (only when the limit was crossed)
//!   ...
//! SessionStop
//! ```
//!
//! Events are small `Copy` values; a tick emits at most three of them.
//!
//! ## Rendering
//!
//! `Display` produces the operator-facing console lines:
//!
//! ```text
//! Adding data to buffer at index 3: X: 0.12, Y: -0.40, Z: 0.93
//! Average Values - X: 0.10, Y: 0.20, Z: 0.30
//! ALERT! Sensor reading exceeded threshold: X: 0.90, Y: 0.10, Z: 0.10
//! ```

use core::fmt;

use crate::sample::{AxisSet, Sample};

/// One step of a session, as seen from outside the core
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Event {
    /// Session allocated and ready
    SessionStart {
        /// Window capacity in samples
        capacity: usize,
        /// Alert limit applied to every axis
        threshold: f32,
    },

    /// A sample was written into the buffer
    SampleBuffered {
        /// 1-based tick number
        tick: u64,
        /// Physical buffer slot that was written
        slot: usize,
        /// The sample as stored
        sample: Sample,
    },

    /// Window average after the tick's push
    WindowAverage {
        /// 1-based tick number
        tick: u64,
        /// Per-axis mean over the valid entries
        average: Sample,
        /// Number of samples the average covers
        window_len: usize,
    },

    /// At least one axis crossed the alert limit
    ThresholdExceeded {
        /// 1-based tick number
        tick: u64,
        /// Offending sample
        sample: Sample,
        /// Limit in force
        limit: f32,
        /// Axes above the limit
        axes: AxisSet,
    },

    /// Session finished after `ticks` samples
    SessionStop {
        /// Samples accepted over the session
        ticks: u64,
    },
}

impl Event {
    /// Tick the event belongs to, if any
    pub const fn tick(&self) -> Option<u64> {
        match self {
            Event::SampleBuffered { tick, .. }
            | Event::WindowAverage { tick, .. }
            | Event::ThresholdExceeded { tick, .. } => Some(*tick),
            Event::SessionStart { .. } | Event::SessionStop { .. } => None,
        }
    }

    /// True for `ThresholdExceeded`
    pub const fn is_alert(&self) -> bool {
        matches!(self, Event::ThresholdExceeded { .. })
    }

    /// Short machine-friendly name
    pub const fn kind(&self) -> &'static str {
        match self {
            Event::SessionStart { .. } => "session_start",
            Event::SampleBuffered { .. } => "sample_buffered",
            Event::WindowAverage { .. } => "window_average",
            Event::ThresholdExceeded { .. } => "threshold_exceeded",
            Event::SessionStop { .. } => "session_stop",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::SessionStart { capacity, threshold } => write!(
                f,
                "Session started - buffer capacity: {}, threshold: {:.2}",
                capacity, threshold
            ),
            Event::SampleBuffered { slot, sample, .. } => {
                write!(f, "Adding data to buffer at index {}: {}", slot, sample)
            }
            Event::WindowAverage { average, .. } => write!(
                f,
                "Average Values - X: {:.2}, Y: {:.2}, Z: {:.2}",
                average.x, average.y, average.z
            ),
            Event::ThresholdExceeded { sample, .. } => {
                write!(f, "ALERT! Sensor reading exceeded threshold: {}", sample)
            }
            Event::SessionStop { ticks } => write!(f, "Session stopped after {} samples", ticks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Axis;

    #[test]
    fn console_lines() {
        let e = Event::SampleBuffered {
            tick: 4,
            slot: 3,
            sample: Sample::new(0.12, -0.4, 0.93),
        };
        assert_eq!(e.to_string(), "Adding data to buffer at index 3: X: 0.12, Y: -0.40, Z: 0.93");
        assert_eq!(e.tick(), Some(4));

        let e = Event::WindowAverage {
            tick: 4,
            average: Sample::new(0.1, 0.2, 0.3),
            window_len: 4,
        };
        assert_eq!(e.to_string(), "Average Values - X: 0.10, Y: 0.20, Z: 0.30");
    }

    #[test]
    fn alert_classification() {
        let mut axes = AxisSet::empty();
        axes.insert(Axis::X);
        let e = Event::ThresholdExceeded {
            tick: 1,
            sample: Sample::new(0.9, 0.1, 0.1),
            limit: 0.8,
            axes,
        };
        assert!(e.is_alert());
        assert_eq!(e.kind(), "threshold_exceeded");
        assert_eq!(
            e.to_string(),
            "ALERT! Sensor reading exceeded threshold: X: 0.90, Y: 0.10, Z: 0.10"
        );

        let stop = Event::SessionStop { ticks: 9 };
        assert!(!stop.is_alert());
        assert_eq!(stop.tick(), None);
    }
}
