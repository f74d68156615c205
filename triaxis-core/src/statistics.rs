//! Session Statistics
//!
//! ## Overview
//!
//! The window average answers "what does the sensor read right now". Session
//! statistics answer "what did it read over the whole run", which can be far
//! longer than the buffer. Two strategies are supported:
//!
//! | Strategy   | Memory        | Standard deviation          | Limit          |
//! |------------|---------------|-----------------------------|----------------|
//! | Streaming  | O(1)          | Welford running moments     | `u64` count    |
//! | Retained   | O(samples)    | Two passes over the history | explicit `max` |
//!
//! Both produce the population standard deviation
//! `sqrt(sum((v - mean)^2) / count)` and agree up to rounding.
//!
//! ## Welford's Method
//!
//! For each new value `v` and running count `n`:
//!
//! ```text
//! delta  = v - mean
//! mean  += delta / n
//! m2    += delta * (v - mean)
//! var    = m2 / n
//! ```
//!
//! This avoids the catastrophic cancellation of `E[v^2] - E[v]^2` and needs no
//! history.
//!
//! ## Failing Closed
//!
//! Every engine has a hard maximum session length. Recording past it returns
//! `SessionCapacityExceeded` and leaves the engine untouched; nothing is
//! truncated or overwritten.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

use crate::errors::{AcquisitionError, AcquisitionResult};
use crate::sample::{Axis, Sample};

/// Running mean and second moment for one axis (Welford)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningMoments {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    /// Empty accumulator
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Fold one value into the moments
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Values pushed so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean so far, `None` before the first value
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Population variance, `None` before the first value
    pub fn population_variance(&self) -> Option<f64> {
        (self.count > 0).then(|| self.m2 / self.count as f64)
    }

    /// Population standard deviation, `None` before the first value
    pub fn std_dev(&self) -> Option<f64> {
        self.population_variance().map(libm::sqrt)
    }
}

/// Mean and population standard deviation of one axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisStatistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

/// Final statistics over every sample recorded in a session
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionStatistics {
    /// Number of samples the statistics cover
    pub count: u64,
    /// X axis
    pub x: AxisStatistics,
    /// Y axis
    pub y: AxisStatistics,
    /// Z axis
    pub z: AxisStatistics,
}

impl SessionStatistics {
    /// Statistics of one axis
    pub const fn axis(&self, axis: Axis) -> &AxisStatistics {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

/// Renders the one-line shutdown summary
impl fmt::Display for SessionStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Statistics - Mean: X: {:.2}, Y: {:.2}, Z: {:.2} | Std Dev: X: {:.2}, Y: {:.2}, Z: {:.2}",
            self.x.mean, self.y.mean, self.z.mean, self.x.std_dev, self.y.std_dev, self.z.std_dev,
        )
    }
}

/// How much history the engine keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Running moments only
    Streaming {
        /// Samples accepted before `SessionCapacityExceeded`
        max_samples: u64,
    },
    /// Every sample, for two-pass statistics
    Retained {
        /// History length, reserved up front
        max_samples: usize,
    },
}

impl Retention {
    /// Session limit as a sample count
    pub const fn max_samples(&self) -> u64 {
        match *self {
            Retention::Streaming { max_samples } => max_samples,
            Retention::Retained { max_samples } => max_samples as u64,
        }
    }
}

/// Accumulates every sample of a session
#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    retention: Retention,
    count: u64,
    sums: [f64; 3],
    moments: [RunningMoments; 3],
    history: Option<Vec<Sample>>,
}

impl StatisticsEngine {
    /// Welford-only engine holding at most `max_samples` samples
    pub fn streaming(max_samples: u64) -> Self {
        Self {
            retention: Retention::Streaming { max_samples },
            count: 0,
            sums: [0.0; 3],
            moments: [RunningMoments::new(); 3],
            history: None,
        }
    }

    /// Engine that keeps every sample, reserving room for `max_samples` up
    /// front
    pub fn retained(max_samples: usize) -> AcquisitionResult<Self> {
        let mut history = Vec::new();
        history
            .try_reserve_exact(max_samples)
            .map_err(|_| AcquisitionError::AllocationFailed { capacity: max_samples })?;

        Ok(Self {
            retention: Retention::Retained { max_samples },
            count: 0,
            sums: [0.0; 3],
            moments: [RunningMoments::new(); 3],
            history: Some(history),
        })
    }

    /// Engine for either retention mode
    pub fn with_retention(retention: Retention) -> AcquisitionResult<Self> {
        match retention {
            Retention::Streaming { max_samples } => Ok(Self::streaming(max_samples)),
            Retention::Retained { max_samples } => Self::retained(max_samples),
        }
    }

    /// Adds one sample to the session
    ///
    /// Sums, count, moments and history change together or not at all.
    pub fn record(&mut self, sample: Sample) -> AcquisitionResult<()> {
        let max = self.retention.max_samples();
        if self.count >= max {
            log_warn!("session limit of {} samples reached, rejecting sample", max);
            return Err(AcquisitionError::SessionCapacityExceeded { max });
        }

        for (i, value) in sample.components().into_iter().enumerate() {
            let value = value as f64;
            self.sums[i] += value;
            self.moments[i].push(value);
        }
        if let Some(history) = self.history.as_mut() {
            history.push(sample);
        }
        self.count += 1;

        Ok(())
    }

    /// Mean and population standard deviation per axis
    ///
    /// Retained engines run the two-pass algorithm over the stored history;
    /// streaming engines report their Welford moments.
    pub fn session_statistics(&self) -> AcquisitionResult<SessionStatistics> {
        if self.count == 0 {
            return Err(AcquisitionError::NoData);
        }

        let axes = match &self.history {
            Some(history) => two_pass(history, &self.sums),
            None => {
                let mut axes = [AxisStatistics { mean: 0.0, std_dev: 0.0 }; 3];
                for (stats, moments) in axes.iter_mut().zip(self.moments.iter()) {
                    stats.mean = moments.mean().ok_or(AcquisitionError::NoData)?;
                    stats.std_dev = moments.std_dev().ok_or(AcquisitionError::NoData)?;
                }
                axes
            }
        };

        Ok(SessionStatistics {
            count: self.count,
            x: axes[0],
            y: axes[1],
            z: axes[2],
        })
    }

    /// Samples recorded so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running sums of x, y, z
    pub fn sums(&self) -> [f64; 3] {
        self.sums
    }

    /// Retention mode and limit
    pub fn retention(&self) -> Retention {
        self.retention
    }

    /// Samples the engine can still accept
    pub fn remaining(&self) -> u64 {
        self.retention.max_samples().saturating_sub(self.count)
    }
}

impl Default for StatisticsEngine {
    fn default() -> Self {
        Self::streaming(u64::MAX)
    }
}

/// Mean from the running sums, then squared deviations over the history
fn two_pass(history: &[Sample], sums: &[f64; 3]) -> [AxisStatistics; 3] {
    let n = history.len() as f64;
    let means = [sums[0] / n, sums[1] / n, sums[2] / n];

    let mut squares = [0.0f64; 3];
    for sample in history {
        for (i, value) in sample.components().into_iter().enumerate() {
            let d = value as f64 - means[i];
            squares[i] += d * d;
        }
    }

    core::array::from_fn(|i| AxisStatistics {
        mean: means[i],
        std_dev: libm::sqrt(squares[i] / n),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn feed(engine: &mut StatisticsEngine, xs: &[f32]) {
        for &x in xs {
            engine.record(Sample::new(x, 0.0, -x)).unwrap();
        }
    }

    #[test]
    fn no_data_before_first_record() {
        let engine = StatisticsEngine::default();
        assert_eq!(engine.session_statistics(), Err(AcquisitionError::NoData));

        let engine = StatisticsEngine::retained(4).unwrap();
        assert_eq!(engine.session_statistics(), Err(AcquisitionError::NoData));
    }

    #[test]
    fn known_sequence_streaming() {
        let mut engine = StatisticsEngine::default();
        feed(&mut engine, &[1.0, 2.0, 3.0]);

        let stats = engine.session_statistics().unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.x.mean - 2.0).abs() < EPS);
        assert!((stats.x.std_dev - (2.0f64 / 3.0).sqrt()).abs() < EPS);
        assert!((stats.z.mean + 2.0).abs() < EPS);
        assert!(stats.y.std_dev.abs() < EPS);
    }

    #[test]
    fn known_sequence_two_pass() {
        let mut engine = StatisticsEngine::retained(10).unwrap();
        feed(&mut engine, &[1.0, 2.0, 3.0]);

        let stats = engine.session_statistics().unwrap();
        assert!((stats.x.mean - 2.0).abs() < EPS);
        assert!((stats.x.std_dev - 0.816_496_580_9).abs() < EPS);
    }

    #[test]
    fn single_sample_has_zero_spread() {
        let mut engine = StatisticsEngine::default();
        engine.record(Sample::new(0.3, -0.2, 0.1)).unwrap();

        let stats = engine.session_statistics().unwrap();
        assert!((stats.x.mean - 0.3).abs() < EPS);
        assert_eq!(stats.x.std_dev, 0.0);
    }

    #[test]
    fn retained_limit_fails_closed() {
        let mut engine = StatisticsEngine::retained(2).unwrap();
        feed(&mut engine, &[1.0, 3.0]);
        let before = engine.session_statistics().unwrap();

        let err = engine.record(Sample::new(100.0, 100.0, 100.0)).unwrap_err();
        assert_eq!(err, AcquisitionError::SessionCapacityExceeded { max: 2 });
        assert_eq!(engine.count(), 2);
        assert_eq!(engine.remaining(), 0);
        assert_eq!(engine.session_statistics().unwrap(), before);
    }

    #[test]
    fn streaming_limit_fails_closed() {
        let mut engine = StatisticsEngine::streaming(1);
        engine.record(Sample::ZERO).unwrap();
        assert!(matches!(
            engine.record(Sample::ZERO),
            Err(AcquisitionError::SessionCapacityExceeded { max: 1 })
        ));
    }

    #[test]
    fn sums_track_every_sample() {
        let mut engine = StatisticsEngine::default();
        feed(&mut engine, &[0.5, 0.25]);
        assert_eq!(engine.sums(), [0.75, 0.0, -0.75]);
    }

    #[test]
    fn summary_line_format() {
        let stats = SessionStatistics {
            count: 3,
            x: AxisStatistics { mean: 2.0, std_dev: 0.8165 },
            y: AxisStatistics { mean: 0.0, std_dev: 0.0 },
            z: AxisStatistics { mean: -2.0, std_dev: 0.8165 },
        };
        assert_eq!(
            stats.to_string(),
            "Statistics - Mean: X: 2.00, Y: 0.00, Z: -2.00 | Std Dev: X: 0.82, Y: 0.00, Z: 0.82"
        );
    }

    #[test]
    fn welford_moments() {
        let mut m = RunningMoments::new();
        assert_eq!(m.mean(), None);
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            m.push(v);
        }
        assert_eq!(m.count(), 8);
        assert!((m.mean().unwrap() - 5.0).abs() < EPS);
        assert!((m.std_dev().unwrap() - 2.0).abs() < EPS);
    }
}
