//! REST API handlers
//!
//! `/` and `/{uf}` are the public surface. Operational endpoints live under
//! `/api/` so they never collide with a region code.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::app::AppState;
use super::classify::RegionBody;
use crate::metrics;
use crate::regions::{Region, RegionRegistry};

// ============================================================================
// API Response Types
// ============================================================================

/// Error body, e.g. for an unknown region
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Error for a code not in the registry, echoing the code as given
    pub fn unknown_region(uf: &str, registry: RegionRegistry) -> Self {
        let valid = registry.codes().collect::<Vec<_>>().join(", ");
        Self::new(format!("UF '{uf}' não encontrada. UFs válidas: {valid}"))
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub regions_populated: usize,
    pub cycles_completed: u64,
    pub last_cycle_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Router
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(docs))
        .route("/api/health", get(health_check))
        .route("/api/regions", get(list_regions))
        .route("/api/metrics", get(prometheus_metrics))
        .route("/{uf}", get(get_region))
        .route("/{uf}/", get(get_region))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

async fn docs(State(state): State<AppState>) -> impl IntoResponse {
    metrics::record_api_request("docs", 200);
    Html(state.docs_html.to_string())
}

async fn get_region(State(state): State<AppState>, Path(uf): Path<String>) -> Response {
    let not_found = |state: &AppState| {
        metrics::record_api_request("region", 404);
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::unknown_region(&uf, state.registry)),
        )
            .into_response()
    };

    let Some(region) = state.registry.get(&uf) else {
        return not_found(&state);
    };

    match state.cache.get(region.code).await {
        Ok(snapshot) => {
            metrics::record_api_request("region", 200);
            let body = RegionBody::new(&state.config.developer, region, &snapshot);
            Json(body).into_response()
        }
        Err(_) => not_found(&state),
    }
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed().as_secs();
    let regions_populated = state.cache.populated_count().await;

    let (cycles_completed, last_cycle_at) = match &state.scheduler {
        Some(scheduler) => {
            let status = scheduler.status().await;
            (
                status.cycles_completed,
                status.last_report.map(|r| r.finished_at),
            )
        }
        None => (0, None),
    };

    metrics::record_api_request("health", 200);
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: uptime,
        regions_populated,
        cycles_completed,
        last_cycle_at,
    })
}

async fn list_regions(State(state): State<AppState>) -> Json<&'static [Region]> {
    metrics::record_api_request("regions", 200);
    Json(state.registry.list())
}

async fn prometheus_metrics() -> Response {
    match metrics::encode_metrics() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("failed to encode metrics")),
            )
                .into_response()
        }
    }
}
