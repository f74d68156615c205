//! Fixed-Capacity Circular Buffer for Sample History
//!
//! ## Overview
//!
//! This module provides the ring buffer that holds the most recent samples of a
//! session (the *window*). Capacity is chosen at runtime, storage is reserved
//! once up front, and nothing is allocated after construction.
//!
//! ## Semantics
//!
//! - `push()` always succeeds. Once the buffer is full the oldest sample is
//!   overwritten, there is no backpressure.
//! - Only slots that were actually written are valid. Unwritten slots are never
//!   part of the window, so the average of the first N < capacity samples is
//!   the mean of exactly those N samples, not a mean diluted by zeros.
//! - Iteration is always oldest-to-newest.
//!
//! ### Memory Layout
//!
//! ```text
//! capacity = 5, after 7 pushes (A..G):
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  F  │  G  │  C  │  D  │  E  │  ← physical slots 0..5
//! └─────┴─────┴─────┴─────┴─────┘
//!             ↑
//!             └── cursor = 2 (next write, also the oldest sample)
//!
//! Logical view: [C, D, E, F, G]
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use triaxis_core::{CircularBuffer, Sample};
//!
//! let mut window = CircularBuffer::with_capacity(3)?;
//! window.push(Sample::new(1.0, 0.0, 0.0));
//! window.push(Sample::new(0.0, 1.0, 0.0));
//!
//! let avg = window.windowed_average()?;
//! assert_eq!(avg, Sample::new(0.5, 0.5, 0.0));
//! # Ok::<(), triaxis_core::AcquisitionError>(())
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::errors::{AcquisitionError, AcquisitionResult};
use crate::sample::Sample;

/// Ring buffer of samples with overwrite-oldest semantics
///
/// ## Internal Invariants
///
/// - `1 <= capacity`
/// - `cursor < capacity`
/// - `slots.len() <= capacity`, and `slots.len()` is the number of valid samples
/// - while not full, valid samples live in `slots[0..len]` in arrival order and
///   `cursor == len`
/// - once full, the oldest sample is at `cursor`
///
/// Not thread-safe. A multi-producer setup must serialise `push` behind a
/// mutex or a channel.
#[derive(Debug, Clone)]
pub struct CircularBuffer {
    /// Written slots. Grows to `capacity` during the initial fill, then is
    /// overwritten in place.
    slots: Vec<Sample>,

    /// Fixed capacity
    capacity: usize,

    /// Index where the next write will occur
    cursor: usize,
}

impl CircularBuffer {
    /// Creates an empty buffer holding at most `capacity` samples
    ///
    /// Storage is reserved here and never grows afterwards. A zero capacity is
    /// rejected with `InvalidCapacity`; a refused reservation is reported as
    /// `AllocationFailed`.
    pub fn with_capacity(capacity: usize) -> AcquisitionResult<Self> {
        if capacity == 0 {
            return Err(AcquisitionError::InvalidCapacity { capacity });
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| AcquisitionError::AllocationFailed { capacity })?;

        Ok(Self {
            slots,
            capacity,
            cursor: 0,
        })
    }

    /// Adds a sample, overwriting the oldest one when full
    ///
    /// Returns the physical slot that was written.
    ///
    /// ```rust
    /// # use triaxis_core::{CircularBuffer, Sample};
    /// let mut buf = CircularBuffer::with_capacity(2).unwrap();
    /// assert_eq!(buf.push(Sample::new(1.0, 1.0, 1.0)), 0);
    /// assert_eq!(buf.push(Sample::new(2.0, 2.0, 2.0)), 1);
    /// // Third push wraps to slot 0 and drops the first sample
    /// assert_eq!(buf.push(Sample::new(3.0, 3.0, 3.0)), 0);
    /// ```
    pub fn push(&mut self, sample: Sample) -> usize {
        let slot = self.cursor;

        if self.slots.len() < self.capacity {
            self.slots.push(sample);
        } else {
            self.slots[slot] = sample;
        }
        self.cursor = (self.cursor + 1) % self.capacity;

        slot
    }

    /// Maximum number of samples held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of valid samples, `min(pushed, capacity)`
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True before the first push
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True once `capacity` samples have been pushed
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    /// Physical slot the next `push` will write
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Most recent sample
    pub fn last(&self) -> Option<&Sample> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.cursor == 0 { self.capacity - 1 } else { self.cursor - 1 };
        self.slots.get(idx)
    }

    /// Per-axis mean of the valid samples
    ///
    /// Divides by the number of valid samples, never by the nominal capacity.
    /// Sums are accumulated in `f64`.
    pub fn windowed_average(&self) -> AcquisitionResult<Sample> {
        if self.is_empty() {
            return Err(AcquisitionError::EmptyWindow);
        }

        // Order does not matter for the sum, so walk the physical slots.
        let (sx, sy, sz) = self.slots.iter().fold((0.0f64, 0.0f64, 0.0f64), |acc, s| {
            (acc.0 + s.x as f64, acc.1 + s.y as f64, acc.2 + s.z as f64)
        });
        let n = self.slots.len() as f64;

        Ok(Sample::new((sx / n) as f32, (sy / n) as f32, (sz / n) as f32))
    }

    /// Valid samples from oldest to newest
    ///
    /// The iterator borrows the buffer, so it is finite and stable; calling
    /// `snapshot()` again without an intervening push yields the same sequence.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            buffer: self,
            index: 0,
        }
    }

    /// Valid samples from oldest to newest, paired with their physical slot
    pub fn slots(&self) -> impl Iterator<Item = (usize, &Sample)> + '_ {
        (0..self.len()).filter_map(move |i| {
            let slot = self.physical_index(i);
            self.slots.get(slot).map(|s| (slot, s))
        })
    }

    /// Drop all samples, keeping the reserved storage
    pub fn clear(&mut self) {
        self.slots.clear();
        self.cursor = 0;
    }

    /// Translates a logical index (0 = oldest) into a physical slot
    ///
    /// ```text
    /// Physical array:  [D, E, A, B, C]  (cursor = 2, full)
    /// Logical view:    [A, B, C, D, E]
    /// logical[0] = physical[(2 + 0) % 5] = A
    /// ```
    fn physical_index(&self, index: usize) -> usize {
        if self.is_full() {
            (self.cursor + index) % self.capacity
        } else {
            index
        }
    }

    /// Sample at a logical index (0 = oldest, len-1 = newest)
    pub fn get(&self, index: usize) -> Option<&Sample> {
        if index >= self.len() {
            return None;
        }
        self.slots.get(self.physical_index(index))
    }
}

/// Oldest-to-newest iterator over a buffer's valid samples
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    buffer: &'a CircularBuffer,
    index: usize,
}

impl<'a> Iterator for Snapshot<'a> {
    type Item = &'a Sample;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Snapshot<'_> {}

impl<'a> IntoIterator for &'a CircularBuffer {
    type Item = &'a Sample;
    type IntoIter = Snapshot<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: f32) -> Sample {
        Sample::new(v, v, v)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(
            CircularBuffer::with_capacity(0).unwrap_err(),
            AcquisitionError::InvalidCapacity { capacity: 0 }
        );
    }

    #[test]
    fn empty_buffer() {
        let buffer = CircularBuffer::with_capacity(5).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 5);
        assert!(buffer.last().is_none());
        assert_eq!(buffer.snapshot().count(), 0);
        assert_eq!(buffer.windowed_average(), Err(AcquisitionError::EmptyWindow));
    }

    #[test]
    fn push_and_retrieve() {
        let mut buffer = CircularBuffer::with_capacity(5).unwrap();

        let slot = buffer.push(Sample::new(0.25, -0.5, 0.75));
        assert_eq!(slot, 0);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.cursor(), 1);

        let last = buffer.last().unwrap();
        assert_eq!(*last, Sample::new(0.25, -0.5, 0.75));
    }

    #[test]
    fn circular_overwrite() {
        let mut buffer = CircularBuffer::with_capacity(3).unwrap();

        for i in 0..5 {
            buffer.push(s(i as f32));
        }

        assert_eq!(buffer.len(), 3);
        assert!(buffer.is_full());
        assert_eq!(buffer.cursor(), 2);

        // 0 and 1 were overwritten
        let values: Vec<f32> = buffer.snapshot().map(|r| r.x).collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
        assert_eq!(buffer.last().unwrap().x, 4.0);
    }

    #[test]
    fn slots_report_physical_positions() {
        let mut buffer = CircularBuffer::with_capacity(3).unwrap();
        for i in 0..4 {
            buffer.push(s(i as f32));
        }

        let slots: Vec<(usize, f32)> = buffer.slots().map(|(i, s)| (i, s.x)).collect();
        assert_eq!(slots, vec![(1, 1.0), (2, 2.0), (0, 3.0)]);
    }

    #[test]
    fn partial_window_divides_by_valid_count() {
        let mut buffer = CircularBuffer::with_capacity(10).unwrap();
        buffer.push(s(1.0));
        buffer.push(s(3.0));

        let avg = buffer.windowed_average().unwrap();
        assert!(approx(avg.x, 2.0));
    }

    #[test]
    fn wrapped_window_average() {
        let mut buffer = CircularBuffer::with_capacity(3).unwrap();
        buffer.push(Sample::new(1.0, 0.0, 0.0));
        buffer.push(Sample::new(0.0, 1.0, 0.0));
        buffer.push(Sample::new(0.0, 0.0, 1.0));
        buffer.push(Sample::new(2.0, 2.0, 2.0));

        let avg = buffer.windowed_average().unwrap();
        assert!(approx(avg.x, 2.0 / 3.0));
        assert!(approx(avg.y, 1.0));
        assert!(approx(avg.z, 1.0));
    }

    #[test]
    fn capacity_one_keeps_latest() {
        let mut buffer = CircularBuffer::with_capacity(1).unwrap();
        for i in 0..4 {
            assert_eq!(buffer.push(s(i as f32)), 0);
        }
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.windowed_average().unwrap(), s(3.0));
    }

    #[test]
    fn snapshot_is_restartable() {
        let mut buffer = CircularBuffer::with_capacity(4).unwrap();
        for i in 0..6 {
            buffer.push(s(i as f32));
        }

        let first: Vec<Sample> = buffer.snapshot().copied().collect();
        let second: Vec<Sample> = buffer.snapshot().copied().collect();
        assert_eq!(first, second);
        assert_eq!(buffer.snapshot().len(), 4);
    }

    #[test]
    fn clear_resets() {
        let mut buffer = CircularBuffer::with_capacity(2).unwrap();
        buffer.push(s(1.0));
        buffer.push(s(2.0));
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor(), 0);
        assert_eq!(buffer.push(s(5.0)), 0);
        assert_eq!(buffer.windowed_average().unwrap(), s(5.0));
    }
}
