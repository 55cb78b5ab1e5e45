//! Error types for the scheduler module

use std::fmt;

/// Result type for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Scheduler-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// `start` was called on a scheduler whose loop is already running
    AlreadyStarted,

    /// Refresh interval must be non-zero
    InvalidInterval { secs: u64 },
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted => write!(f, "Scheduler has already been started"),
            Self::InvalidInterval { secs } => {
                write!(f, "Invalid refresh interval '{}s'. Must be at least 1s", secs)
            }
        }
    }
}

impl std::error::Error for SchedulerError {}

impl SchedulerError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        false
    }
}
