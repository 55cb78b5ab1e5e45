//! concursos - Brazilian public-exam listings per state
//!
//! Periodically scrapes one listing page per federative unit, keeps the
//! latest good snapshot of each in memory, and serves them over a small
//! read-only JSON API.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`regions`] - The fixed registry of 27 federative units
//! - [`crawler`] - Listing page fetching behind the [`crawler::PageSource`] trait
//! - [`parser`] - HTML table extraction into ordered records
//! - [`cache`] - Per-region snapshot store
//! - [`refresh`] - One concurrent fetch/extract/commit cycle over all regions
//! - [`scheduler`] - Periodic cycles with cancellation
//! - [`server`] - axum router and handlers
//! - [`config`] - Configuration management and settings
//! - [`metrics`] - Prometheus metrics
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use concursos::cache::SnapshotCache;
//! use concursos::crawler::RegionFetcher;
//! use concursos::refresh::RefreshEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = Arc::new(SnapshotCache::default());
//!     let engine = RefreshEngine::new(Arc::new(RegionFetcher::new()?), cache.clone());
//!
//!     let report = engine.run_cycle().await;
//!     println!("{} regions updated", report.succeeded());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod crawler;
pub mod error;
pub mod metrics;
pub mod models;
pub mod parser;
pub mod refresh;
pub mod regions;
pub mod scheduler;
pub mod server;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::SnapshotCache;
    pub use crate::config::Config;
    pub use crate::crawler::{PageSource, RegionFetcher};
    pub use crate::error::{ConcursosErrorTrait, Error, ErrorCategory, Result};
    pub use crate::models::{Record, RegionSnapshot};
    pub use crate::parser::TableExtractor;
    pub use crate::refresh::{CycleReport, RefreshEngine};
    pub use crate::regions::{Region, RegionRegistry};
    pub use crate::scheduler::RefreshScheduler;
}

// Direct re-exports for convenience
pub use models::{Record, RegionSnapshot};
pub use regions::{Region, RegionRegistry};
