//! Periodic refresh scheduler
//!
//! Runs a refresh cycle immediately on start, then once per interval until
//! shut down.
//!
//! # Timing
//!
//! Cycles are paced with `tokio::time::interval`, so the interval is measured
//! from the start of the previous cycle. Cycles never overlap: a cycle that
//! outlasts the interval makes the scheduler skip the missed tick and wait
//! for the next boundary.
//!
//! # Shutdown
//!
//! A `CancellationToken` is raced against both the wait for the next tick and
//! the in-flight cycle. Cancelling drops the cycle future, abandoning any
//! outstanding fetches. Regions that already committed keep their new data.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use concursos::scheduler::RefreshScheduler;
//! use std::time::Duration;
//!
//! let scheduler = RefreshScheduler::new(engine, Duration::from_secs(3600))?;
//! let handle = scheduler.start()?;
//!
//! // later
//! scheduler.shutdown();
//! handle.await?;
//! ```

pub mod error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::refresh::{CycleReport, RefreshEngine};

pub use error::{SchedulerError, SchedulerResult};

/// Scheduler status snapshot
#[derive(Debug, Clone, Default)]
pub struct SchedulerStatus {
    /// Whether the refresh loop is currently running
    pub is_running: bool,

    /// Configured interval between cycle starts
    pub interval_secs: u64,

    /// Cycles that ran to completion
    pub cycles_completed: u64,

    /// Report of the most recent completed cycle
    pub last_report: Option<CycleReport>,
}

/// Long-lived task driving the refresh engine on a fixed interval
pub struct RefreshScheduler {
    engine: Arc<RefreshEngine>,
    interval: Duration,
    token: CancellationToken,
    started: AtomicBool,
    status: Arc<RwLock<SchedulerStatus>>,
}

impl RefreshScheduler {
    /// Create a scheduler
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidInterval` for a zero interval
    pub fn new(engine: Arc<RefreshEngine>, interval: Duration) -> SchedulerResult<Self> {
        if interval.is_zero() {
            return Err(SchedulerError::InvalidInterval {
                secs: interval.as_secs(),
            });
        }

        let status = SchedulerStatus {
            interval_secs: interval.as_secs(),
            ..Default::default()
        };

        Ok(Self {
            engine,
            interval,
            token: CancellationToken::new(),
            started: AtomicBool::new(false),
            status: Arc::new(RwLock::new(status)),
        })
    }

    /// Spawn the refresh loop
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::AlreadyStarted` if the loop was already
    /// spawned by an earlier call. No second loop is created.
    pub fn start(&self) -> SchedulerResult<JoinHandle<()>> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(SchedulerError::AlreadyStarted);
        }

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Starting refresh scheduler"
        );

        Ok(tokio::spawn(run_loop(
            self.engine.clone(),
            self.interval,
            self.token.clone(),
            self.status.clone(),
        )))
    }

    /// Request shutdown; the loop exits at the next await point
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// Token that stops the loop when cancelled
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Check if the loop is running
    pub async fn is_running(&self) -> bool {
        self.status.read().await.is_running
    }

    /// Get scheduler status
    pub async fn status(&self) -> SchedulerStatus {
        self.status.read().await.clone()
    }
}

async fn run_loop(
    engine: Arc<RefreshEngine>,
    interval: Duration,
    token: CancellationToken,
    status: Arc<RwLock<SchedulerStatus>>,
) {
    status.write().await.is_running = true;

    // First tick completes immediately
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let report = tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::info!("Shutdown requested, abandoning in-flight refresh cycle");
                break;
            }
            report = engine.run_cycle() => report,
        };

        let mut guard = status.write().await;
        guard.cycles_completed += 1;

        tracing::info!(
            cycle = guard.cycles_completed,
            succeeded = report.succeeded(),
            failed = report.failed(),
            records = report.total_records(),
            duration_ms = report.duration.as_millis() as u64,
            "Refresh cycle completed"
        );

        guard.last_report = Some(report);
    }

    status.write().await.is_running = false;
    tracing::info!("Refresh scheduler stopped");
}
