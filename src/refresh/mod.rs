//! Refresh engine: one fan-out/fan-in cycle over every region
//!
//! Each region gets its own future that fetches the listing page, extracts
//! the table and, only on success, commits the records to that region's
//! cache entry. A failure in one region never touches any other region and
//! leaves its own previous snapshot in place.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::SnapshotCache;
use crate::crawler::PageSource;
use crate::metrics;
use crate::parser::TableExtractor;
use crate::regions::RegionRegistry;

// ============================================================================
// Cycle Report
// ============================================================================

/// Result of refreshing a single region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Snapshot replaced with this many records
    Updated { records: usize },

    /// Fetch or extraction failed, previous snapshot retained
    Failed { reason: String },
}

/// Per-region entry in a [`CycleReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionOutcome {
    pub uf: &'static str,
    pub status: OutcomeStatus,
}

impl RegionOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self.status, OutcomeStatus::Updated { .. })
    }
}

/// Summary of one refresh cycle, outcomes in registry order
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration: Duration,
    pub outcomes: Vec<RegionOutcome>,
}

impl CycleReport {
    /// Number of regions whose snapshot was replaced
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_updated()).count()
    }

    /// Number of regions that kept their previous snapshot
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Records committed during this cycle
    pub fn total_records(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                OutcomeStatus::Updated { records } => records,
                OutcomeStatus::Failed { .. } => 0,
            })
            .sum()
    }

    /// Outcome for one region, if it was part of the cycle
    pub fn outcome(&self, uf: &str) -> Option<&RegionOutcome> {
        self.outcomes.iter().find(|o| o.uf == uf)
    }
}

// ============================================================================
// Refresh Engine
// ============================================================================

/// Drives fetch and extract for every region and commits results to the cache
pub struct RefreshEngine {
    registry: RegionRegistry,
    source: Arc<dyn PageSource>,
    extractor: TableExtractor,
    cache: Arc<SnapshotCache>,
}

impl RefreshEngine {
    /// Create an engine over the cache's registry
    pub fn new(source: Arc<dyn PageSource>, cache: Arc<SnapshotCache>) -> Self {
        Self {
            registry: cache.registry(),
            source,
            extractor: TableExtractor::new(),
            cache,
        }
    }

    /// The cache this engine commits to
    pub fn cache(&self) -> &Arc<SnapshotCache> {
        &self.cache
    }

    /// Run one full cycle over every region
    ///
    /// Completes only after every region has resolved. Never fails: per-region
    /// errors are reported as `Failed` outcomes.
    pub async fn run_cycle(&self) -> CycleReport {
        let started_at = Utc::now();
        let timer = Instant::now();

        tracing::debug!(regions = self.registry.len(), "Starting refresh cycle");

        let tasks = self.registry.codes().map(|uf| self.refresh_region(uf));
        let outcomes = join_all(tasks).await;

        let duration = timer.elapsed();
        metrics::record_cycle(duration.as_secs_f64());

        CycleReport {
            started_at,
            finished_at: Utc::now(),
            duration,
            outcomes,
        }
    }

    /// Fetch, extract and commit a single region
    async fn refresh_region(&self, uf: &'static str) -> RegionOutcome {
        let result = match self.source.fetch(uf).await {
            Ok(html) => self
                .extractor
                .extract(&html)
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        let status = match result {
            Ok(records) => {
                let count = records.len();
                match self.cache.put(uf, records).await {
                    Ok(_) => {
                        tracing::info!(uf = %uf, records = count, "Region updated");
                        metrics::record_region_updated(uf, count);
                        OutcomeStatus::Updated { records: count }
                    }
                    Err(e) => OutcomeStatus::Failed {
                        reason: e.to_string(),
                    },
                }
            }
            Err(reason) => {
                tracing::warn!(uf = %uf, error = %reason, "Refresh failed, keeping previous data");
                metrics::record_region_failed(uf);
                OutcomeStatus::Failed { reason }
            }
        };

        RegionOutcome { uf, status }
    }
}
