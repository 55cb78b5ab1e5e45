//! Listing page fetching
//!
//! [`PageSource`] is the seam between the refresh engine and the network:
//! [`fetcher::RegionFetcher`] implements it over HTTP.

pub mod fetcher;
pub mod headers;

use async_trait::async_trait;

use crate::utils::error::FetchError;

pub use fetcher::RegionFetcher;

/// Source of raw listing HTML for a region
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the listing page for region `uf`
    async fn fetch(&self, uf: &str) -> Result<String, FetchError>;
}
