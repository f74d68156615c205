//! Time-Related Constants

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Tick interval of the monitoring profile (milliseconds).
///
/// 1 Hz: slow enough to read the per-tick buffer dump.
pub const MONITOR_INTERVAL_MS: u64 = MS_PER_SECOND;

/// Tick interval of the recording profile (milliseconds).
///
/// 100 Hz, for building up long sessions quickly.
pub const RECORD_INTERVAL_MS: u64 = MS_PER_SECOND / 100;
