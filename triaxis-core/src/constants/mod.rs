//! Constants for Triaxis Core
//!
//! Every default the acquisition loop falls back to lives here, so the
//! configuration layer and the tests agree on them.
//!
//! ## Organization
//!
//! - **Buffers**: window capacity and session length limits
//! - **Time**: sampling intervals
//! - **Alerts**: threshold defaults and simulated signal range

/// Window capacity and session length limits.
pub mod buffers;

/// Sampling intervals and unit conversions.
pub mod time;

/// Alert thresholds and the simulated signal range.
pub mod alerts;

pub use buffers::{DEFAULT_BUFFER_CAPACITY, DEFAULT_RETAINED_SESSION_SAMPLES, UNLIMITED_SESSION_SAMPLES};
pub use time::{MONITOR_INTERVAL_MS, RECORD_INTERVAL_MS, MS_PER_SECOND};
pub use alerts::{MONITOR_THRESHOLD, RECORD_THRESHOLD, SIMULATED_MIN, SIMULATED_MAX};
