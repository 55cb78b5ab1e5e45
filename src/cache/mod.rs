//! In-memory snapshot cache, one entry per region
//!
//! The region map is built once from the registry and never changes shape.
//! Each region sits behind its own lock holding an `Arc<RegionSnapshot>`:
//! readers clone the `Arc` and release the lock at once, writers swap in a
//! whole new snapshot. A reader therefore sees either the old or the new
//! snapshot for a region, never a mix, and a write to one region never
//! touches another.
//!
//! # Example
//!
//! ```rust,ignore
//! use concursos::cache::SnapshotCache;
//! use concursos::regions::RegionRegistry;
//!
//! let cache = SnapshotCache::new(RegionRegistry::brazil());
//! let snapshot = cache.get("pa").await?;
//! assert!(!snapshot.is_populated());
//! ```

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{Record, RegionSnapshot};
use crate::regions::RegionRegistry;
use crate::utils::error::UnknownRegion;

/// Cache status summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStatus {
    /// Number of registry regions
    pub regions: usize,

    /// Regions with at least one successful refresh
    pub populated: usize,

    /// Records across all regions
    pub total_records: usize,

    /// Most recent commit across all regions
    pub last_refresh: Option<DateTime<Utc>>,
}

/// Thread-safe per-region snapshot store
pub struct SnapshotCache {
    registry: RegionRegistry,
    entries: HashMap<&'static str, RwLock<Arc<RegionSnapshot>>>,
}

impl SnapshotCache {
    /// Create a cache with an empty snapshot for every registry region
    pub fn new(registry: RegionRegistry) -> Self {
        let entries = registry
            .codes()
            .map(|code| (code, RwLock::new(Arc::new(RegionSnapshot::empty(code)))))
            .collect();

        Self { registry, entries }
    }

    /// The registry this cache was built from
    pub fn registry(&self) -> RegionRegistry {
        self.registry
    }

    fn entry(&self, uf: &str) -> Result<&RwLock<Arc<RegionSnapshot>>, UnknownRegion> {
        self.registry
            .get(uf)
            .and_then(|region| self.entries.get(region.code))
            .ok_or_else(|| UnknownRegion::new(uf))
    }

    /// Get the current snapshot for a region
    ///
    /// Never fails for a registry code; returns the empty placeholder if the
    /// region has never been refreshed. Lookup is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRegion` if `uf` is not in the registry
    pub async fn get(&self, uf: &str) -> Result<Arc<RegionSnapshot>, UnknownRegion> {
        let entry = self.entry(uf)?;
        let snapshot = entry.read().await.clone();
        Ok(snapshot)
    }

    /// Replace a region's snapshot with freshly scraped records
    ///
    /// The new snapshot is stamped with the current time. Only the refresh
    /// engine should call this.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRegion` if `uf` is not in the registry
    pub async fn put(
        &self,
        uf: &str,
        records: Vec<Record>,
    ) -> Result<Arc<RegionSnapshot>, UnknownRegion> {
        let region = self.registry.get(uf).ok_or_else(|| UnknownRegion::new(uf))?;
        let entry = self
            .entries
            .get(region.code)
            .ok_or_else(|| UnknownRegion::new(uf))?;

        let snapshot = Arc::new(RegionSnapshot::refreshed(region.code, records));
        *entry.write().await = snapshot.clone();

        Ok(snapshot)
    }

    /// Number of regions with at least one successful refresh
    pub async fn populated_count(&self) -> usize {
        let mut count = 0;
        for entry in self.entries.values() {
            if entry.read().await.is_populated() {
                count += 1;
            }
        }
        count
    }

    /// Get cache status
    pub async fn status(&self) -> CacheStatus {
        let mut status = CacheStatus {
            regions: self.entries.len(),
            ..Default::default()
        };

        for entry in self.entries.values() {
            let snapshot = entry.read().await.clone();
            if snapshot.is_populated() {
                status.populated += 1;
            }
            status.total_records += snapshot.len();
            status.last_refresh = status.last_refresh.max(snapshot.refreshed_at);
        }

        status
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(RegionRegistry::brazil())
    }
}
