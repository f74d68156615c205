//! Core acquisition engine for Triaxis
//!
//! Keeps a bounded window of 3-axis samples and statistics over a whole
//! session. No I/O happens here; sources, sinks and the clock are supplied by
//! the caller.
//!
//! Key properties:
//! - Fixed window memory, reserved once at session start
//! - O(1) session statistics by default (Welford), or a capacity-checked
//!   history for two-pass statistics
//! - Builds without `std` (needs `alloc`)
//!
//! ```no_run
//! use triaxis_core::{Session, SessionConfig, Sample};
//!
//! let mut session = Session::new(SessionConfig::default())?;
//!
//! for sample in [Sample::new(0.1, 0.2, 0.3), Sample::new(0.9, 0.0, 0.0)] {
//!     let report = session.ingest(sample)?;
//!     for event in report.events() {
//!         println!("{event}");
//!     }
//! }
//!
//! println!("{}", session.finish()?);
//! # Ok::<(), triaxis_core::AcquisitionError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

pub mod buffer;
pub mod constants;
pub mod errors;
pub mod events;
pub mod sample;
pub mod session;
pub mod statistics;
pub mod threshold;
pub mod time;
pub mod traits;

// Public API
pub use buffer::{CircularBuffer, Snapshot};
pub use errors::{AcquisitionError, AcquisitionResult};
pub use events::Event;
pub use sample::{Axis, AxisSet, Sample};
pub use session::{Alert, Session, SessionConfig, TickReport};
pub use statistics::{AxisStatistics, Retention, RunningMoments, SessionStatistics, StatisticsEngine};
pub use threshold::{ThresholdConfig, ThresholdMonitor};
pub use traits::{ReplaySource, SampleSink, SampleSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
