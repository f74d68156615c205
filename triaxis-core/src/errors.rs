//! Error Types for Sample Acquisition and Statistics
//!
//! ## Design Philosophy
//!
//! The core never touches I/O, so every error here is about data availability
//! or resource limits:
//!
//! 1. **Small Size**: Variants carry at most a couple of scalars. Errors are
//!    returned once per tick and must stay cheap.
//!
//! 2. **No Heap Allocation**: No `String` payloads, so the enum works the same
//!    with and without `std`.
//!
//! 3. **Copy Semantics**: Errors implement `Copy` and `PartialEq` so callers and
//!    tests can match and compare them freely.
//!
//! ## Error Categories
//!
//! ### Construction
//! - `InvalidCapacity`: a buffer of zero slots was requested
//! - `InvalidThreshold`: a negative or NaN alert limit
//! - `AllocationFailed`: the allocator refused the requested storage
//!
//! ### Data Availability
//! - `EmptyWindow`: windowed average asked for before the first push
//! - `NoData`: session statistics asked for before the first record
//! - `SourceExhausted`: a finite sample source has nothing left
//!
//! ### Limits
//! - `SessionCapacityExceeded`: the session reached its hard sample limit
//!
//! ## Handling Strategy
//!
//! ```rust
//! use triaxis_core::{AcquisitionError, CircularBuffer};
//!
//! let buffer = CircularBuffer::with_capacity(4).unwrap();
//! match buffer.windowed_average() {
//!     Ok(avg) => println!("{avg}"),
//!     Err(AcquisitionError::EmptyWindow) => println!("Average Values - (no samples yet)"),
//!     Err(other) => panic!("unexpected: {other}"),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for acquisition operations
pub type AcquisitionResult<T> = Result<T, AcquisitionError>;

/// Acquisition errors - kept small and `Copy`
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AcquisitionError {
    /// Buffer capacity must be at least one slot
    #[error("Invalid buffer capacity {capacity}: must be at least 1")]
    InvalidCapacity {
        /// The rejected capacity
        capacity: usize,
    },

    /// Alert limit must be a non-negative number
    #[error("Invalid threshold {value}: must be a non-negative number")]
    InvalidThreshold {
        /// The rejected limit
        value: f32,
    },

    /// Storage for the buffer or session history could not be reserved
    #[error("Could not allocate storage for {capacity} samples")]
    AllocationFailed {
        /// Number of samples that was requested
        capacity: usize,
    },

    /// No sample has been pushed into the buffer yet
    #[error("Window is empty: no samples buffered")]
    EmptyWindow,

    /// No sample has been recorded in the session yet
    #[error("No data collected for statistics")]
    NoData,

    /// The session already holds its maximum number of samples
    #[error("Session capacity of {max} samples exceeded")]
    SessionCapacityExceeded {
        /// Configured maximum session length
        max: u64,
    },

    /// A finite sample source has been drained
    #[error("Sample source exhausted")]
    SourceExhausted,
}

impl AcquisitionError {
    /// True for errors the caller is expected to recover from locally by
    /// printing a placeholder instead of a value.
    pub const fn is_data_unavailable(&self) -> bool {
        matches!(self, Self::EmptyWindow | Self::NoData)
    }
}
