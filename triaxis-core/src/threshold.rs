//! Threshold monitor
//!
//! Compares each component of a sample against one limit. The monitor is
//! stateless; rendering or forwarding an alert is the caller's job.

use crate::errors::{AcquisitionError, AcquisitionResult};
use crate::sample::{Axis, AxisSet, Sample};

/// Alert limit applied to x, y and z alike
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdConfig {
    limit: f32,
}

impl ThresholdConfig {
    /// Rejects negative and NaN limits
    pub fn new(limit: f32) -> AcquisitionResult<Self> {
        if limit.is_nan() || limit < 0.0 {
            return Err(AcquisitionError::InvalidThreshold { value: limit });
        }
        Ok(Self { limit })
    }

    /// The validated limit
    pub const fn limit(&self) -> f32 {
        self.limit
    }
}

/// Per-sample alert check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdMonitor {
    config: ThresholdConfig,
}

impl ThresholdMonitor {
    /// Monitor for a validated limit
    pub const fn new(config: ThresholdConfig) -> Self {
        Self { config }
    }

    /// Limit in force
    pub const fn limit(&self) -> f32 {
        self.config.limit
    }

    /// Replace the limit
    pub fn configure(&mut self, config: ThresholdConfig) {
        self.config = config;
    }

    /// True when any component strictly exceeds the limit
    pub fn evaluate(&self, sample: &Sample) -> bool {
        sample.components().iter().any(|&v| v > self.config.limit)
    }

    /// Axes whose component strictly exceeds the limit
    pub fn exceeded_axes(&self, sample: &Sample) -> AxisSet {
        let mut axes = AxisSet::empty();
        for axis in Axis::ALL {
            if sample.axis(axis) > self.config.limit {
                axes.insert(axis);
            }
        }
        axes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(limit: f32) -> ThresholdMonitor {
        ThresholdMonitor::new(ThresholdConfig::new(limit).unwrap())
    }

    #[test]
    fn any_axis_above_limit_alerts() {
        let m = monitor(0.8);
        assert!(m.evaluate(&Sample::new(0.9, 0.1, 0.1)));
        assert!(!m.evaluate(&Sample::new(0.5, -0.9, 0.79)));
    }

    #[test]
    fn comparison_is_strict() {
        let m = monitor(0.5);
        assert!(!m.evaluate(&Sample::new(0.5, 0.5, 0.5)));
        assert!(m.exceeded_axes(&Sample::new(0.5, 0.5, 0.5)).is_empty());
    }

    #[test]
    fn negative_values_never_exceed() {
        // Only the upper side is checked, magnitude is irrelevant
        let m = monitor(0.0);
        assert!(!m.evaluate(&Sample::new(-5.0, -1.0, 0.0)));
    }

    #[test]
    fn exceeded_axes_reports_each_axis() {
        let m = monitor(0.8);
        let axes = m.exceeded_axes(&Sample::new(0.9, 0.1, 0.95));
        assert!(axes.contains(Axis::X));
        assert!(!axes.contains(Axis::Y));
        assert!(axes.contains(Axis::Z));
    }

    #[test]
    fn invalid_limits_rejected() {
        assert_eq!(
            ThresholdConfig::new(-0.1),
            Err(AcquisitionError::InvalidThreshold { value: -0.1 })
        );
        assert!(ThresholdConfig::new(f32::NAN).is_err());
        assert!(ThresholdConfig::new(0.0).is_ok());
    }

    #[test]
    fn reconfigure() {
        let mut m = monitor(0.8);
        m.configure(ThresholdConfig::new(0.05).unwrap());
        assert_eq!(m.limit(), 0.05);
        assert!(m.evaluate(&Sample::new(0.1, 0.0, 0.0)));
    }
}
