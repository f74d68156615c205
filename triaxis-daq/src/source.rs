//! Simulated 3-axis sensor

use std::convert::Infallible;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use triaxis_core::constants::{SIMULATED_MAX, SIMULATED_MIN};
use triaxis_core::{Sample, SampleSource};

/// Uniform noise on every axis
///
/// Each component is drawn independently from `[min, max)`. A seeded sensor
/// always produces the same sequence.
#[derive(Debug, Clone)]
pub struct SimulatedSensor {
    rng: StdRng,
    min: f32,
    max: f32,
}

impl SimulatedSensor {
    /// Sensor reading in `[-1.0, 1.0)`, seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible sensor
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            min: SIMULATED_MIN,
            max: SIMULATED_MAX,
        }
    }

    /// Change the output range. Bounds are swapped if given in reverse.
    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        self.min = min;
        self.max = max;
        self
    }

    fn component(&mut self) -> f32 {
        if self.min == self.max {
            return self.min;
        }
        self.rng.gen_range(self.min..self.max)
    }
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for SimulatedSensor {
    type Error = Infallible;

    fn next_sample(&mut self) -> Result<Sample, Self::Error> {
        let x = self.component();
        let y = self.component();
        let z = self.component();
        Ok(Sample::new(x, y, z))
    }
}
