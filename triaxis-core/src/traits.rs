//! Core traits for the collaborators around a session
//!
//! A session only needs two things from the outside world: something that
//! produces samples and something that stores them. Keep them simple.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::errors::AcquisitionError;
use crate::sample::Sample;
use crate::time::Timestamp;

/// Produces one 3-axis sample per call
pub trait SampleSource {
    /// Why no sample could be produced
    type Error;

    /// Read the next sample
    fn next_sample(&mut self) -> Result<Sample, Self::Error>;
}

/// Durable destination for samples (a log file, usually)
pub trait SampleSink {
    /// Storage failure
    type Error;

    /// Write whatever preamble the format needs. Called once, before any sample.
    fn write_header(&mut self) -> Result<(), Self::Error>;

    /// Append one sample taken at `timestamp`
    fn write_sample(&mut self, sample: &Sample, timestamp: Timestamp) -> Result<(), Self::Error>;

    /// Push buffered writes to the underlying medium
    fn flush(&mut self) -> Result<(), Self::Error>;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    type Error = S::Error;

    fn next_sample(&mut self) -> Result<Sample, Self::Error> {
        (**self).next_sample()
    }
}

impl<S: SampleSink + ?Sized> SampleSink for &mut S {
    type Error = S::Error;

    fn write_header(&mut self) -> Result<(), Self::Error> {
        (**self).write_header()
    }

    fn write_sample(&mut self, sample: &Sample, timestamp: Timestamp) -> Result<(), Self::Error> {
        (**self).write_sample(sample, timestamp)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }
}

/// Replays a fixed list of samples, then reports `SourceExhausted`
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    samples: Vec<Sample>,
    position: usize,
}

impl ReplaySource {
    /// Source over `samples`, in order
    pub fn new(samples: impl Into<Vec<Sample>>) -> Self {
        Self {
            samples: samples.into(),
            position: 0,
        }
    }

    /// Samples not yet handed out
    pub fn remaining(&self) -> usize {
        self.samples.len() - self.position
    }

    /// Start again from the first sample
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

impl SampleSource for ReplaySource {
    type Error = AcquisitionError;

    fn next_sample(&mut self) -> Result<Sample, Self::Error> {
        let sample = *self
            .samples
            .get(self.position)
            .ok_or(AcquisitionError::SourceExhausted)?;
        self.position += 1;
        Ok(sample)
    }
}

impl FromIterator<Sample> for ReplaySource {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}
