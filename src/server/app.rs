//! API server implementation
//!
//! Wires the snapshot cache, optional scheduler and configuration into the
//! axum router and runs it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::api::create_router;
use super::docs::render_docs;
use crate::cache::SnapshotCache;
use crate::config::ServerConfig;
use crate::regions::RegionRegistry;
use crate::scheduler::RefreshScheduler;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Snapshot cache, read-only from the handlers' side
    pub cache: Arc<SnapshotCache>,

    /// Region registry
    pub registry: RegionRegistry,

    /// Refresh scheduler, for health reporting
    pub scheduler: Option<Arc<RefreshScheduler>>,

    /// Pre-rendered documentation page
    pub docs_html: Arc<str>,

    /// Server start time
    pub start_time: Instant,

    /// Configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create state over a cache, rendering the docs page once
    pub fn new(cache: Arc<SnapshotCache>, config: ServerConfig) -> Result<Self, ServerError> {
        let registry = cache.registry();
        let docs_html = render_docs(registry, &config.developer)?;

        Ok(Self {
            cache,
            registry,
            scheduler: None,
            docs_html: docs_html.into(),
            start_time: Instant::now(),
            config,
        })
    }

    /// Attach the scheduler whose progress `/api/health` reports
    pub fn with_scheduler(mut self, scheduler: Arc<RefreshScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }
}

// ============================================================================
// API Server
// ============================================================================

/// Read-only HTTP server over the snapshot cache
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a new server
    pub fn new(state: AppState) -> Self {
        Self {
            config: state.config.clone(),
            state,
        }
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> SocketAddr {
        self.config.bind_address
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone());

        // Add CORS layer if enabled
        if self.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        // Add tracing layer if enabled
        if self.config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router();
        let addr = self.config.bind_address;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(format!("{addr}: {e}")))?;

        tracing::info!(address = %addr, "API server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        tracing::info!("API server shutdown complete");
        Ok(())
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// Server errors
#[derive(Debug, Clone)]
pub enum ServerError {
    /// State could not be initialized
    Init(String),

    /// Failed to bind to address
    Bind(String),

    /// Server error
    Serve(String),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "Initialization error: {}", msg),
            Self::Bind(msg) => write!(f, "Failed to bind: {}", msg),
            Self::Serve(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}
