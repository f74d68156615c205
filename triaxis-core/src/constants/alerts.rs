//! Alert Thresholds and Signal Range

/// Alert limit of the monitoring profile.
pub const MONITOR_THRESHOLD: f32 = 0.5;

/// Alert limit of the recording profile.
pub const RECORD_THRESHOLD: f32 = 0.8;

/// Lower bound of simulated readings.
pub const SIMULATED_MIN: f32 = -1.0;

/// Upper bound of simulated readings (exclusive).
pub const SIMULATED_MAX: f32 = 1.0;
