//! Acquisition loop
//!
//! ## Overview
//!
//! The runner owns one `Session` plus its collaborators (sample source, sample
//! log, clock, console) and drives one tick per timer interval:
//!
//! ```text
//!   ┌──────────── cancelled? / sample limit? ──────────── yes ──► shutdown
//!   │ no
//!   ▼
//! wait for tick ─► read sample ─► session.ingest ─► log row ─► console
//!   ▲                                                           │
//!   └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cancellation
//!
//! Ctrl-C only cancels a `CancellationToken`. The loop checks the token before
//! each tick and while waiting for the timer, so a tick that has started always
//! completes. Shutdown then prints the final statistics and flushes the log.
//! Session, file handle and buffers are released when the runner is dropped,
//! on every exit path.
//!
//! ## Failure policy
//!
//! | Failure                       | Effect                                  |
//! |-------------------------------|-----------------------------------------|
//! | session allocation, log open  | `Runner::new` fails, nothing runs       |
//! | zero tick interval            | mode default used, warning logged       |
//! | log write after startup       | reported once, loop continues           |
//! | source error                  | loop ends normally                      |
//! | session limit reached         | loop ends, exit code 2                  |
//! | any other ingest error        | loop ends, exit code 1                  |

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use triaxis_core::time::TimeSource;
use triaxis_core::{
    AcquisitionError, Event, SampleSink, SampleSource, Session, SessionStatistics,
};

use crate::config::DaqConfig;
use crate::console::Console;
use crate::errors::{DaqError, Result, EXIT_OK, EXIT_RESOURCE, EXIT_SESSION_LIMIT};

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopReason {
    /// Cancellation token fired (Ctrl-C)
    Cancelled,
    /// `max_samples` ticks completed
    SampleLimit,
    /// The sample source had nothing more to give
    SourceExhausted,
    /// The session refused a sample because it is full
    SessionLimit { max: u64 },
    /// The session refused a sample for any other reason
    Rejected(AcquisitionError),
}

impl StopReason {
    /// Stop reason for a sample the session refused
    pub const fn for_rejection(error: AcquisitionError) -> Self {
        match error {
            AcquisitionError::SessionCapacityExceeded { max } => StopReason::SessionLimit { max },
            other => StopReason::Rejected(other),
        }
    }

    pub const fn exit_code(&self) -> u8 {
        match self {
            StopReason::SessionLimit { .. } => EXIT_SESSION_LIMIT,
            StopReason::Rejected(_) => EXIT_RESOURCE,
            _ => EXIT_OK,
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Cancelled => f.write_str("cancelled"),
            StopReason::SampleLimit => f.write_str("sample limit reached"),
            StopReason::SourceExhausted => f.write_str("source exhausted"),
            StopReason::SessionLimit { max } => write!(f, "session limit of {max} samples reached"),
            StopReason::Rejected(e) => write!(f, "sample rejected: {e}"),
        }
    }
}

/// What a finished run looked like
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub reason: StopReason,
    pub ticks: u64,
    pub alerts: u64,
    pub statistics: Option<SessionStatistics>,
    /// Failed log writes and flushes
    pub sink_errors: u64,
}

impl RunReport {
    pub fn exit_code(&self) -> u8 {
        self.reason.exit_code()
    }
}

/// Drives a session from a source into a sink
pub struct Runner<S, K, C, W>
where
    S: SampleSource,
    K: SampleSink<Error = io::Error>,
    C: TimeSource,
    W: Write,
{
    session: Session,
    source: S,
    sink: K,
    clock: C,
    console: Console<W>,
    interval: Duration,
    max_samples: Option<u64>,
    dump_buffer: bool,
    summary_json: bool,
    alerts: u64,
    sink_errors: u64,
    console_failed: bool,
}

impl<S, K, C, W> Runner<S, K, C, W>
where
    S: SampleSource,
    S::Error: fmt::Display,
    K: SampleSink<Error = io::Error>,
    C: TimeSource,
    W: Write,
{
    /// Allocate the session and write the log header
    ///
    /// Any failure here is a startup failure: nothing has been sampled yet.
    pub fn new(config: &DaqConfig, source: S, sink: K, clock: C, console: Console<W>) -> Result<Self> {
        let session = Session::new(config.session)?;
        Self::with_session(session, config, source, sink, clock, console)
    }

    /// Wrap a session that is already allocated and write the log header
    ///
    /// Lets the caller allocate before touching the log file, so a session
    /// that cannot be created never truncates an existing log.
    pub fn with_session(
        session: Session,
        config: &DaqConfig,
        source: S,
        mut sink: K,
        clock: C,
        console: Console<W>,
    ) -> Result<Self> {
        sink.write_header().map_err(DaqError::Sink)?;

        Ok(Self {
            session,
            source,
            sink,
            clock,
            console,
            interval: tick_interval(config),
            max_samples: config.max_samples,
            dump_buffer: config.dump_buffer,
            summary_json: config.summary_json,
            alerts: 0,
            sink_errors: 0,
            console_failed: false,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Time between ticks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run until cancelled, out of samples, or at a limit
    pub async fn run(mut self, cancel: CancellationToken) -> RunReport {
        let start = self.session.start_event();
        info!(
            capacity = self.session.buffer().capacity(),
            threshold = self.session.monitor().limit(),
            interval_ms = self.interval.as_millis() as u64,
            "acquisition started"
        );
        self.print(&start);

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let reason = loop {
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if self.max_samples.is_some_and(|max| self.session.ticks() >= max) {
                break StopReason::SampleLimit;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break StopReason::Cancelled,
                _ = ticker.tick() => {}
            }

            if let Some(reason) = self.tick() {
                break reason;
            }
        };

        self.shutdown(reason)
    }

    /// One complete tick. Returns a stop reason when the loop must end.
    fn tick(&mut self) -> Option<StopReason> {
        let sample = match self.source.next_sample() {
            Ok(sample) => sample,
            Err(e) => {
                info!("sample source stopped: {e}");
                return Some(StopReason::SourceExhausted);
            }
        };

        let report = match self.session.ingest(sample) {
            Ok(report) => report,
            Err(e) => {
                let reason = StopReason::for_rejection(e);
                error!("{reason}, stopping");
                return Some(reason);
            }
        };

        let timestamp = self.clock.now();
        if let Err(e) = self.sink.write_sample(&report.sample, timestamp) {
            self.sink_failure("write", &e);
        }

        for event in report.events() {
            if event.is_alert() {
                self.alerts += 1;
                debug!(tick = report.tick, axes = %report.alert.map(|a| a.axes).unwrap_or_default(), "threshold exceeded");
            }
            self.print(&event);
        }
        if self.dump_buffer {
            let result = self.console.buffer_dump(self.session.buffer());
            self.console_result(result);
        }

        None
    }

    /// Final statistics, log flush, release
    fn shutdown(mut self, reason: StopReason) -> RunReport {
        info!(%reason, ticks = self.session.ticks(), "Exiting gracefully...");

        let ticks = self.session.ticks();
        self.print(&Event::SessionStop { ticks });

        let statistics = self.session.session_statistics();
        let result = self.console.summary(&statistics);
        self.console_result(result);
        if self.summary_json {
            let result = self.console.summary_json(&statistics);
            self.console_result(result);
        }
        let result = self.console.flush();
        self.console_result(result);

        if let Err(e) = self.sink.flush() {
            self.sink_failure("flush", &e);
        }

        RunReport {
            reason,
            ticks,
            alerts: self.alerts,
            statistics: statistics.ok(),
            sink_errors: self.sink_errors,
        }
    }

    fn print(&mut self, event: &Event) {
        let result = self.console.event(event);
        self.console_result(result);
    }

    fn console_result(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if !self.console_failed {
                warn!("console output failed: {e}");
                self.console_failed = true;
            }
        }
    }

    /// First failure is an error, repeats are only debug noise
    fn sink_failure(&mut self, op: &str, e: &io::Error) {
        self.sink_errors += 1;
        if self.sink_errors == 1 {
            error!("sample log {op} failed: {e}; continuing without guaranteed logging");
        } else {
            debug!("sample log {op} failed again ({} total): {e}", self.sink_errors);
        }
    }
}

/// Configured interval, or the mode default when it is zero
///
/// `tokio::time::interval` cannot tick every 0 ms.
fn tick_interval(config: &DaqConfig) -> Duration {
    if !config.interval.is_zero() {
        return config.interval;
    }

    let fallback = Duration::from_millis(config.mode.default_interval_ms());
    let error = DaqError::InvalidConfiguration {
        field: "interval",
        value: format!("{:?}", config.interval),
        reason: "must be a positive number of milliseconds",
    };
    warn!("{error}; using default of {} ms", fallback.as_millis());
    fallback
}
