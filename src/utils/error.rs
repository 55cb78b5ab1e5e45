//! Error types for the concursos scraper
//!
//! This module defines the per-stage error types raised while fetching and
//! extracting a region's listing page, plus the lookup error surfaced to
//! API callers.

use thiserror::Error;

/// Errors that can occur while fetching a region's listing page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection failure, timeout, or any transport-level error
    #[error("network error: {cause}")]
    Network { cause: String },

    /// Response status outside the 2xx range
    #[error("HTTP status {code}")]
    HttpStatus { code: u16 },

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl FetchError {
    /// Create a network error from any displayable cause
    pub fn network(cause: impl std::fmt::Display) -> Self {
        Self::Network {
            cause: cause.to_string(),
        }
    }
}

/// Errors that can occur while extracting records from a listing page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The document has no `<table>` element at all
    #[error("no table found in document")]
    NoTableFound,
}

/// A region code that is not part of the registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown region: {uf}")]
pub struct UnknownRegion {
    pub uf: String,
}

impl UnknownRegion {
    pub fn new(uf: impl Into<String>) -> Self {
        Self { uf: uf.into() }
    }
}
