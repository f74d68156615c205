//! Acquisition session
//!
//! A `Session` owns everything that changes while samples arrive: the window
//! buffer, the statistics engine and the threshold monitor. There is no
//! process-wide state; whoever drives the loop owns the session and hands it
//! one sample per tick.
//!
//! ## One tick
//!
//! ```text
//! ingest(sample)
//!   1. record into the statistics engine   (may fail: session limit)
//!   2. push into the window buffer         (never fails)
//!   3. recompute the window average
//!   4. evaluate the threshold
//!   -> TickReport
//! ```
//!
//! Recording comes first so a rejected sample leaves the buffer untouched too.
//! After `ingest` returns for tick N, buffer and engine reflect exactly the
//! first N accepted samples.
//!
//! ```rust
//! use triaxis_core::{Session, SessionConfig, Sample};
//!
//! let mut session = Session::new(SessionConfig::default().with_capacity(3))?;
//! let report = session.ingest(Sample::new(0.9, 0.1, 0.1))?;
//! assert_eq!(report.tick, 1);
//! assert!(report.alert.is_some());
//!
//! let stats = session.finish()?;
//! assert_eq!(stats.count, 1);
//! # Ok::<(), triaxis_core::AcquisitionError>(())
//! ```

use crate::buffer::CircularBuffer;
use crate::constants::{DEFAULT_BUFFER_CAPACITY, MONITOR_THRESHOLD, UNLIMITED_SESSION_SAMPLES};
use crate::errors::AcquisitionResult;
use crate::events::Event;
use crate::sample::{AxisSet, Sample};
use crate::statistics::{Retention, SessionStatistics, StatisticsEngine};
use crate::threshold::{ThresholdConfig, ThresholdMonitor};

/// Everything needed to start a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Window capacity in samples
    pub capacity: usize,
    /// Alert limit, validated by `Session::new`
    pub threshold: f32,
    /// Session statistics mode and limit
    pub retention: Retention,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_BUFFER_CAPACITY,
            threshold: MONITOR_THRESHOLD,
            retention: Retention::Streaming {
                max_samples: UNLIMITED_SESSION_SAMPLES,
            },
        }
    }
}

impl SessionConfig {
    /// Set the window capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the alert limit
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the statistics retention
    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }
}

/// Alert raised during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alert {
    /// Limit in force
    pub limit: f32,
    /// Axes above it
    pub axes: AxisSet,
}

/// Outcome of one `ingest` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// 1-based tick number
    pub tick: u64,
    /// Physical buffer slot the sample went to
    pub slot: usize,
    /// The ingested sample
    pub sample: Sample,
    /// Window average including this sample
    pub average: Sample,
    /// Samples covered by `average`
    pub window_len: usize,
    /// Set when the sample crossed the limit
    pub alert: Option<Alert>,
}

impl TickReport {
    /// Events of this tick, in emission order
    pub fn events(&self) -> impl Iterator<Item = Event> {
        let buffered = Event::SampleBuffered {
            tick: self.tick,
            slot: self.slot,
            sample: self.sample,
        };
        let average = Event::WindowAverage {
            tick: self.tick,
            average: self.average,
            window_len: self.window_len,
        };
        let alert = self.alert.map(|alert| Event::ThresholdExceeded {
            tick: self.tick,
            sample: self.sample,
            limit: alert.limit,
            axes: alert.axes,
        });

        [Some(buffered), Some(average), alert].into_iter().flatten()
    }
}

/// Buffer, statistics and monitor of one acquisition run
#[derive(Debug, Clone)]
pub struct Session {
    buffer: CircularBuffer,
    statistics: StatisticsEngine,
    monitor: ThresholdMonitor,
    ticks: u64,
}

impl Session {
    /// Allocate buffer and engine
    ///
    /// Fails on zero capacity, an invalid threshold, or a refused allocation.
    pub fn new(config: SessionConfig) -> AcquisitionResult<Self> {
        let buffer = CircularBuffer::with_capacity(config.capacity)?;
        let statistics = StatisticsEngine::with_retention(config.retention)?;
        let monitor = ThresholdMonitor::new(ThresholdConfig::new(config.threshold)?);

        log_debug!(
            "session ready: capacity={} threshold={} retention={:?}",
            config.capacity,
            config.threshold,
            config.retention
        );

        Ok(Self {
            buffer,
            statistics,
            monitor,
            ticks: 0,
        })
    }

    /// Event announcing the session, for the reporter
    pub fn start_event(&self) -> Event {
        Event::SessionStart {
            capacity: self.buffer.capacity(),
            threshold: self.monitor.limit(),
        }
    }

    /// Process one sample
    pub fn ingest(&mut self, sample: Sample) -> AcquisitionResult<TickReport> {
        self.statistics.record(sample)?;
        let slot = self.buffer.push(sample);
        self.ticks += 1;

        // The buffer cannot be empty right after a push
        let average = self.buffer.windowed_average()?;

        let alert = self.monitor.evaluate(&sample).then(|| Alert {
            limit: self.monitor.limit(),
            axes: self.monitor.exceeded_axes(&sample),
        });

        Ok(TickReport {
            tick: self.ticks,
            slot,
            sample,
            average,
            window_len: self.buffer.len(),
            alert,
        })
    }

    /// The sample window
    pub fn buffer(&self) -> &CircularBuffer {
        &self.buffer
    }

    /// Session-wide accumulator
    pub fn statistics(&self) -> &StatisticsEngine {
        &self.statistics
    }

    /// Alert check
    pub fn monitor(&self) -> &ThresholdMonitor {
        &self.monitor
    }

    /// Samples accepted so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Statistics over every accepted sample, without ending the session
    pub fn session_statistics(&self) -> AcquisitionResult<SessionStatistics> {
        self.statistics.session_statistics()
    }

    /// End the session and release its storage
    pub fn finish(self) -> AcquisitionResult<SessionStatistics> {
        log_debug!("session finished after {} ticks", self.ticks);
        self.statistics.session_statistics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AcquisitionError;
    use crate::sample::Axis;

    #[test]
    fn report_tracks_tick_and_slot() {
        let mut session = Session::new(SessionConfig::default().with_capacity(2)).unwrap();

        let r1 = session.ingest(Sample::new(0.1, 0.1, 0.1)).unwrap();
        let r2 = session.ingest(Sample::new(0.2, 0.2, 0.2)).unwrap();
        let r3 = session.ingest(Sample::new(0.3, 0.3, 0.3)).unwrap();

        assert_eq!((r1.tick, r1.slot), (1, 0));
        assert_eq!((r2.tick, r2.slot), (2, 1));
        assert_eq!((r3.tick, r3.slot), (3, 0));
        assert_eq!(r3.window_len, 2);
        assert!((r3.average.x - 0.25).abs() < 1e-6);
        assert_eq!(session.statistics().count(), 3);
    }

    #[test]
    fn alert_only_when_exceeded() {
        let mut session = Session::new(SessionConfig::default().with_threshold(0.8)).unwrap();

        let quiet = session.ingest(Sample::new(0.5, -0.9, 0.79)).unwrap();
        assert!(quiet.alert.is_none());
        assert_eq!(quiet.events().count(), 2);

        let loud = session.ingest(Sample::new(0.9, 0.1, 0.1)).unwrap();
        let alert = loud.alert.unwrap();
        assert_eq!(alert.limit, 0.8);
        assert!(alert.axes.contains(Axis::X));

        let kinds: Vec<&str> = loud.events().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["sample_buffered", "window_average", "threshold_exceeded"]);
    }

    #[test]
    fn rejected_sample_leaves_state_untouched() {
        let config = SessionConfig::default()
            .with_capacity(4)
            .with_retention(Retention::Retained { max_samples: 2 });
        let mut session = Session::new(config).unwrap();

        session.ingest(Sample::new(1.0, 1.0, 1.0)).unwrap();
        session.ingest(Sample::new(2.0, 2.0, 2.0)).unwrap();

        let err = session.ingest(Sample::new(9.0, 9.0, 9.0)).unwrap_err();
        assert_eq!(err, AcquisitionError::SessionCapacityExceeded { max: 2 });
        assert_eq!(session.ticks(), 2);
        assert_eq!(session.buffer().len(), 2);
        assert_eq!(session.buffer().last(), Some(&Sample::new(2.0, 2.0, 2.0)));

        let stats = session.finish().unwrap();
        assert!((stats.x.mean - 1.5).abs() < 1e-9);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert_eq!(
            Session::new(SessionConfig::default().with_capacity(0)).unwrap_err(),
            AcquisitionError::InvalidCapacity { capacity: 0 }
        );
        assert!(matches!(
            Session::new(SessionConfig::default().with_threshold(-1.0)),
            Err(AcquisitionError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn finish_without_samples_is_no_data() {
        let session = Session::new(SessionConfig::default()).unwrap();
        assert_eq!(session.start_event().to_string(), "Session started - buffer capacity: 10, threshold: 0.50");
        assert_eq!(session.finish(), Err(AcquisitionError::NoData));
    }
}
