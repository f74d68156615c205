//! Clocks for sample timestamps
//!
//! The session never reads the time. Timestamps are taken by the acquisition
//! loop when a sample goes to the sink, so the clock is a plain input that
//! tests can replace.

use core::cell::Cell;

/// Milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Anything that can stamp a sample
pub trait TimeSource {
    /// Current time in milliseconds since the epoch
    fn now(&self) -> Timestamp;
}

/// Wall clock
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        // A clock set before 1970 reads as the epoch
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as Timestamp)
            .unwrap_or(0)
    }
}

/// Deterministic clock: every read returns `start + step * reads_so_far`
///
/// ```
/// use triaxis_core::time::{SteppingClock, TimeSource};
///
/// let clock = SteppingClock::new(1_000, 10);
/// assert_eq!(clock.now(), 1_000);
/// assert_eq!(clock.now(), 1_010);
/// ```
#[derive(Debug, Clone)]
pub struct SteppingClock {
    start: Timestamp,
    step: u64,
    reads: Cell<u64>,
}

impl SteppingClock {
    /// First read returns `start`, each later read `step` ms more
    pub fn new(start: Timestamp, step: u64) -> Self {
        Self {
            start,
            step,
            reads: Cell::new(0),
        }
    }

    /// Clock that never moves
    pub fn fixed(at: Timestamp) -> Self {
        Self::new(at, 0)
    }

    /// How many times `now()` was called
    pub fn reads(&self) -> u64 {
        self.reads.get()
    }
}

impl TimeSource for SteppingClock {
    fn now(&self) -> Timestamp {
        let n = self.reads.get();
        self.reads.set(n + 1);
        self.start.saturating_add(self.step.saturating_mul(n))
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_clock_counts_reads() {
        let clock = SteppingClock::new(500, 250);
        let stamps: [Timestamp; 3] = core::array::from_fn(|_| clock.now());
        assert_eq!(stamps, [500, 750, 1000]);
        assert_eq!(clock.reads(), 3);
    }

    #[test]
    fn fixed_clock_stands_still() {
        let clock = SteppingClock::fixed(42);
        assert_eq!(clock.now(), 42);
        assert_eq!((&clock).now(), 42);
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        let clock = SteppingClock::new(u64::MAX - 1, u64::MAX);
        clock.now();
        assert_eq!(clock.now(), u64::MAX);
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now() > 1_577_836_800_000);
    }
}
