//! Command-line and environment configuration
//!
//! Every option can come from a flag or a `TRIAXIS_*` environment variable.
//! Out-of-range or unparsable numbers never abort the program: they are
//! replaced by the documented default and reported as `InvalidConfiguration`
//! warnings, which the caller logs. Capacity, threshold and interval are
//! therefore taken as text and parsed in [`Cli::resolve`].
//!
//! ## Profiles
//!
//! | Mode      | Threshold | Interval | Timestamped log | Buffer dump |
//! |-----------|-----------|----------|-----------------|-------------|
//! | `monitor` | 0.5       | 1000 ms  | no              | yes         |
//! | `record`  | 0.8       | 10 ms    | yes             | no          |
//!
//! Explicit flags override the profile.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use triaxis_core::constants::{
    DEFAULT_BUFFER_CAPACITY, DEFAULT_RETAINED_SESSION_SAMPLES, MONITOR_INTERVAL_MS,
    MONITOR_THRESHOLD, RECORD_INTERVAL_MS, RECORD_THRESHOLD, UNLIMITED_SESSION_SAMPLES,
};
use triaxis_core::{Retention, SessionConfig, ThresholdConfig};

use crate::errors::DaqError;

/// Default sample log path
pub const DEFAULT_LOG_FILE: &str = "sensor_data_log.csv";

/// Default profile selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Slow ticks, buffer dump every tick, plain X,Y,Z log
    #[default]
    Monitor,
    /// Fast ticks, timestamped log, summary-oriented
    Record,
}

impl Mode {
    pub const fn default_threshold(self) -> f32 {
        match self {
            Mode::Monitor => MONITOR_THRESHOLD,
            Mode::Record => RECORD_THRESHOLD,
        }
    }

    pub const fn default_interval_ms(self) -> u64 {
        match self {
            Mode::Monitor => MONITOR_INTERVAL_MS,
            Mode::Record => RECORD_INTERVAL_MS,
        }
    }

    pub const fn timestamps(self) -> bool {
        matches!(self, Mode::Record)
    }

    pub const fn dump_buffer(self) -> bool {
        matches!(self, Mode::Monitor)
    }
}

/// Simulated 3-axis sensor with windowed averages, alerts and session statistics
#[derive(Debug, Clone, Parser)]
#[command(name = "triaxis", version, about)]
pub struct Cli {
    /// Window capacity in samples
    #[arg(value_name = "CAPACITY", env = "TRIAXIS_CAPACITY", allow_negative_numbers = true)]
    pub capacity: Option<String>,

    /// Alert threshold applied to every axis [default: per mode]
    #[arg(value_name = "THRESHOLD", env = "TRIAXIS_THRESHOLD", allow_negative_numbers = true)]
    pub threshold: Option<String>,

    /// Milliseconds between samples [default: per mode]
    #[arg(long, env = "TRIAXIS_INTERVAL_MS", allow_negative_numbers = true)]
    pub interval_ms: Option<String>,

    /// Default profile
    #[arg(long, value_enum, env = "TRIAXIS_MODE", default_value_t = Mode::Monitor)]
    pub mode: Mode,

    /// CSV file samples are written to (truncated on start)
    #[arg(long, env = "TRIAXIS_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Prefix every logged sample with a local timestamp
    #[arg(long, overrides_with = "no_timestamps")]
    pub timestamps: bool,

    /// Log bare X,Y,Z rows
    #[arg(long, overrides_with = "timestamps")]
    pub no_timestamps: bool,

    /// Print the whole window after every tick
    #[arg(long, overrides_with = "no_dump_buffer")]
    pub dump_buffer: bool,

    /// Never print the window
    #[arg(long, overrides_with = "dump_buffer")]
    pub no_dump_buffer: bool,

    /// Stop after this many samples instead of waiting for Ctrl-C
    #[arg(long)]
    pub max_samples: Option<u64>,

    /// Keep every sample and compute statistics in two passes
    #[arg(long)]
    pub retain_history: bool,

    /// Hard session length; exceeding it ends the run with exit code 2
    #[arg(long)]
    pub max_session_samples: Option<u64>,

    /// Seed for the simulated sensor [default: random]
    #[arg(long, env = "TRIAXIS_SEED")]
    pub seed: Option<u64>,

    /// Also print the final statistics as one JSON line
    #[arg(long)]
    pub summary_json: bool,
}

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct DaqConfig {
    pub mode: Mode,
    pub session: SessionConfig,
    pub interval: Duration,
    pub log_file: PathBuf,
    pub timestamps: bool,
    pub dump_buffer: bool,
    pub max_samples: Option<u64>,
    pub seed: Option<u64>,
    pub summary_json: bool,
}

impl Default for DaqConfig {
    fn default() -> Self {
        let mode = Mode::default();
        Self {
            mode,
            session: SessionConfig::default()
                .with_capacity(DEFAULT_BUFFER_CAPACITY)
                .with_threshold(mode.default_threshold()),
            interval: Duration::from_millis(mode.default_interval_ms()),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            timestamps: mode.timestamps(),
            dump_buffer: mode.dump_buffer(),
            max_samples: None,
            seed: None,
            summary_json: false,
        }
    }
}

impl DaqConfig {
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_samples(mut self, max: u64) -> Self {
        self.max_samples = Some(max);
        self
    }

    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }
}

impl Cli {
    /// Resolve flags against the mode profile
    ///
    /// Returns the configuration plus one `InvalidConfiguration` per value
    /// that was replaced by its default.
    pub fn resolve(self) -> (DaqConfig, Vec<DaqError>) {
        let mode = self.mode;
        let mut warnings = Vec::new();

        let capacity = match self.capacity.as_deref().map(str::trim) {
            None => DEFAULT_BUFFER_CAPACITY,
            Some(raw) => match raw.parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    warnings.push(invalid("capacity", raw, "must be a positive integer"));
                    DEFAULT_BUFFER_CAPACITY
                }
            },
        };

        let threshold = match self.threshold.as_deref().map(str::trim) {
            None => mode.default_threshold(),
            Some(raw) => match raw.parse::<f32>().ok().map(ThresholdConfig::new) {
                Some(Ok(config)) => config.limit(),
                _ => {
                    warnings.push(invalid("threshold", raw, "must be a non-negative number"));
                    mode.default_threshold()
                }
            },
        };

        let interval_ms = match self.interval_ms.as_deref().map(str::trim) {
            None => mode.default_interval_ms(),
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    warnings.push(invalid("interval", raw, "must be a positive number of milliseconds"));
                    mode.default_interval_ms()
                }
            },
        };

        let retention = if self.retain_history {
            let max = match self.max_session_samples {
                None => DEFAULT_RETAINED_SESSION_SAMPLES,
                Some(raw) => match usize::try_from(raw) {
                    Ok(max) if max > 0 => max,
                    _ => {
                        warnings.push(invalid("max session samples", raw, "must be a positive integer"));
                        DEFAULT_RETAINED_SESSION_SAMPLES
                    }
                },
            };
            Retention::Retained { max_samples: max }
        } else {
            let max = match self.max_session_samples {
                None => UNLIMITED_SESSION_SAMPLES,
                Some(0) => {
                    warnings.push(invalid("max session samples", 0, "must be a positive integer"));
                    UNLIMITED_SESSION_SAMPLES
                }
                Some(max) => max,
            };
            Retention::Streaming { max_samples: max }
        };

        let timestamps = flag(self.timestamps, self.no_timestamps, mode.timestamps());
        let dump_buffer = flag(self.dump_buffer, self.no_dump_buffer, mode.dump_buffer());

        let config = DaqConfig {
            mode,
            session: SessionConfig {
                capacity,
                threshold,
                retention,
            },
            interval: Duration::from_millis(interval_ms),
            log_file: self.log_file,
            timestamps,
            dump_buffer,
            max_samples: self.max_samples,
            seed: self.seed,
            summary_json: self.summary_json,
        };

        (config, warnings)
    }
}

fn invalid(field: &'static str, value: impl ToString, reason: &'static str) -> DaqError {
    DaqError::InvalidConfiguration {
        field,
        value: value.to_string(),
        reason,
    }
}

/// `--x` / `--no-x` pair falling back to the profile
fn flag(on: bool, off: bool, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        default
    }
}
