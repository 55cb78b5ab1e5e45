//! Unified error handling for the concursos crate
//!
//! Each stage keeps its own error type; this module wraps them in a single
//! `Error` enum for code that crosses module boundaries.
//!
//! # Architecture
//!
//! - [`ConcursosErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use concursos::error::{ConcursosErrorTrait, Error};
//!
//! fn report(err: &Error) {
//!     if err.is_recoverable() {
//!         tracing::warn!(category = ?err.category(), error = %err, "Will retry next cycle");
//!     } else {
//!         tracing::error!(error = %err, "Fatal error");
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

pub use crate::config::ConfigError;
pub use crate::scheduler::error::SchedulerError;
pub use crate::server::ServerError;
pub use crate::utils::error::{ExtractError, FetchError, UnknownRegion};

/// Result type using the crate-wide [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Common trait for all concursos error types
pub trait ConcursosErrorTrait: std::error::Error {
    /// Check if this error is transient (a later attempt may succeed)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;

    /// Short Portuguese description for user-facing messages
    fn user_message(&self) -> String {
        format!("{}: {}", self.category().description(), self)
    }
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection failures, timeouts and bad HTTP statuses
    Network,
    /// Listing page could not be turned into records
    Parsing,
    /// Configuration and validation errors
    Config,
    /// Scheduler lifecycle errors
    Scheduler,
    /// Unknown region codes
    Lookup,
    /// Filesystem and socket errors
    Io,
}

impl ErrorCategory {
    /// Portuguese description of the category
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Erro de rede",
            Self::Parsing => "Erro de extração",
            Self::Config => "Erro de configuração",
            Self::Scheduler => "Erro do agendador",
            Self::Lookup => "UF não encontrada",
            Self::Io => "Erro de E/S",
        }
    }
}

/// Unified error type for the concursos crate
#[derive(Error, Debug)]
pub enum Error {
    /// Listing page fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Table extraction errors
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),

    /// Region code not in the registry
    #[error(transparent)]
    UnknownRegion(#[from] UnknownRegion),

    /// Scheduler errors
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConcursosErrorTrait for FetchError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::HttpStatus { code } => *code == 429 || *code >= 500,
            Self::Client(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Network
    }
}

impl ConcursosErrorTrait for ExtractError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Parsing
    }
}

impl ConcursosErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Extract(e) => e.is_recoverable(),
            Self::Scheduler(e) => e.is_recoverable(),
            Self::Io(_) => true,
            Self::UnknownRegion(_) | Self::Config(_) | Self::Server(_) | Self::Json(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(_) => ErrorCategory::Network,
            Self::Extract(_) | Self::Json(_) => ErrorCategory::Parsing,
            Self::UnknownRegion(_) => ErrorCategory::Lookup,
            Self::Scheduler(_) => ErrorCategory::Scheduler,
            Self::Config(_) => ErrorCategory::Config,
            Self::Server(_) | Self::Io(_) => ErrorCategory::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let err: Error = FetchError::HttpStatus { code: 503 }.into();
        assert!(matches!(err, Error::Fetch(_)));

        let err: Error = ExtractError::NoTableFound.into();
        assert!(matches!(err, Error::Extract(_)));

        let err: Error = UnknownRegion::new("xx").into();
        assert_eq!(err.to_string(), "unknown region: xx");
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            Error::from(FetchError::network("reset")).category(),
            ErrorCategory::Network
        );
        assert_eq!(
            Error::from(ExtractError::NoTableFound).category(),
            ErrorCategory::Parsing
        );
        assert_eq!(
            Error::from(UnknownRegion::new("xx")).category(),
            ErrorCategory::Lookup
        );
        assert_eq!(
            Error::from(SchedulerError::AlreadyStarted).category(),
            ErrorCategory::Scheduler
        );
    }

    #[test]
    fn test_recoverability() {
        assert!(FetchError::network("timed out after 30s").is_recoverable());
        assert!(FetchError::HttpStatus { code: 503 }.is_recoverable());
        assert!(FetchError::HttpStatus { code: 429 }.is_recoverable());
        assert!(!FetchError::HttpStatus { code: 404 }.is_recoverable());
        assert!(!FetchError::Client("bad".into()).is_recoverable());
        assert!(!Error::from(ExtractError::NoTableFound).is_recoverable());
        assert!(!Error::from(SchedulerError::AlreadyStarted).is_recoverable());
    }

    #[test]
    fn test_user_message() {
        let err = Error::from(UnknownRegion::new("xx"));
        assert_eq!(err.user_message(), "UF não encontrada: unknown region: xx");
    }
}
