//! Buffer Sizes and Session Limits

/// Default window capacity (samples).
///
/// Ten samples is one tenth of a second at the recording interval and ten
/// seconds at the monitoring interval.
pub const DEFAULT_BUFFER_CAPACITY: usize = 10;

/// Default hard limit for a session that retains every sample.
///
/// Retained sessions reserve `limit * 12` bytes up front, so the default is
/// kept small. Raise it with `--max-session-samples`.
pub const DEFAULT_RETAINED_SESSION_SAMPLES: usize = 1000;

/// Limit used by streaming sessions when none is configured.
///
/// Welford accumulation is O(1) in memory; the only bound is the counter.
pub const UNLIMITED_SESSION_SAMPLES: u64 = u64::MAX;
