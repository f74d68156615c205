//! Application errors
//!
//! The core only reports data-availability and limit errors. Everything that
//! touches the outside world (files, configuration) is reported here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use triaxis_core::AcquisitionError;

/// Process exit code for a clean shutdown
pub const EXIT_OK: u8 = 0;
/// Exit code when a resource (buffer, log file) could not be acquired
pub const EXIT_RESOURCE: u8 = 1;
/// Exit code when the session hit its hard sample limit
pub const EXIT_SESSION_LIMIT: u8 = 2;

/// Errors raised by the acquisition loop
#[derive(Debug, Error)]
pub enum DaqError {
    /// A configuration value was out of range. Normally recovered by
    /// substituting the default; kept as an error so the warning has a
    /// single wording.
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidConfiguration {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Startup could not acquire a resource
    #[error("Could not acquire {resource} ({path}): {source}")]
    ResourceAcquisition {
        resource: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to the sample log failed after startup
    #[error("Sample log write failed: {0}")]
    Sink(#[from] io::Error),

    /// Error from the acquisition core
    #[error(transparent)]
    Core(#[from] AcquisitionError),
}

impl DaqError {
    /// Exit code the process should report for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            DaqError::Core(AcquisitionError::SessionCapacityExceeded { .. }) => EXIT_SESSION_LIMIT,
            _ => EXIT_RESOURCE,
        }
    }

    /// True for failures that happen before the first tick
    pub fn is_startup_failure(&self) -> bool {
        matches!(
            self,
            DaqError::ResourceAcquisition { .. }
                | DaqError::Core(
                    AcquisitionError::AllocationFailed { .. }
                        | AcquisitionError::InvalidCapacity { .. }
                        | AcquisitionError::InvalidThreshold { .. }
                )
        )
    }
}

pub type Result<T> = std::result::Result<T, DaqError>;
