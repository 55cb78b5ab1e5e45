//! Prometheus metrics for refresh cycles and the HTTP API
//!
//! This module provides metrics tracking for:
//! - Refresh: cycles run, cycle duration, per-region outcomes and record counts
//! - API: requests by endpoint and status
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! Until then (or if registration fails) every recording call is a no-op.

use prometheus::{
    register_counter, register_counter_vec, register_gauge_vec, register_histogram, Counter,
    CounterVec, Encoder, GaugeVec, Histogram, TextEncoder,
};
use std::sync::{Mutex, OnceLock};

// ============================================================================
// Metrics Storage
// ============================================================================

/// Container for all service metrics
struct Metrics {
    cycles: Counter,
    cycle_duration: Histogram,
    region_refresh: CounterVec,
    region_records: GaugeVec,
    api_requests: CounterVec,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Serializes registration so concurrent callers never double-register
static INIT_LOCK: Mutex<()> = Mutex::new(());

// ============================================================================
// Initialization
// ============================================================================

/// Initialize all Prometheus metrics
///
/// Safe to call more than once; later calls are no-ops.
///
/// # Example
///
/// ```ignore
/// if let Err(e) = concursos::metrics::init_metrics() {
///     tracing::warn!(error = %e, "Metrics initialization failed");
/// }
/// ```
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = INIT_LOCK.lock().map_err(|_| "metrics init lock poisoned")?;
    if METRICS.get().is_some() {
        return Ok(());
    }

    let metrics = Metrics {
        cycles: register_counter!(
            "concursos_refresh_cycles_total",
            "Total number of completed refresh cycles"
        )?,
        cycle_duration: register_histogram!(
            "concursos_refresh_cycle_duration_seconds",
            "Refresh cycle duration in seconds",
            vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]
        )?,
        region_refresh: register_counter_vec!(
            "concursos_region_refresh_total",
            "Per-region refresh outcomes",
            &["uf", "result"]
        )?,
        region_records: register_gauge_vec!(
            "concursos_region_records",
            "Records in the current snapshot of each region",
            &["uf"]
        )?,
        api_requests: register_counter_vec!(
            "concursos_api_requests_total",
            "Total API requests by endpoint and status",
            &["endpoint", "status"]
        )?,
    };

    METRICS
        .set(metrics)
        .map_err(|_| "Metrics already initialized")?;

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

/// Check if metrics have been initialized
pub fn metrics_initialized() -> bool {
    METRICS.get().is_some()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record a finished refresh cycle
pub fn record_cycle(duration_secs: f64) {
    if let Some(m) = METRICS.get() {
        m.cycles.inc();
        m.cycle_duration.observe(duration_secs);
    }
}

/// Record a region whose snapshot was replaced
pub fn record_region_updated(uf: &str, records: usize) {
    if let Some(m) = METRICS.get() {
        m.region_refresh.with_label_values(&[uf, "updated"]).inc();
        m.region_records.with_label_values(&[uf]).set(records as f64);
    }
}

/// Record a region whose refresh failed and kept its previous snapshot
pub fn record_region_failed(uf: &str) {
    if let Some(m) = METRICS.get() {
        m.region_refresh.with_label_values(&[uf, "failed"]).inc();
    }
}

/// Record API request
pub fn record_api_request(endpoint: &str, status: u16) {
    if let Some(m) = METRICS.get() {
        let status_str = status.to_string();
        m.api_requests
            .with_label_values(&[endpoint, &status_str])
            .inc();
    }
}
