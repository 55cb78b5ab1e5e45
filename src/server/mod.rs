//! Read-only HTTP API
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | HTML documentation page |
//! | GET | `/{uf}` | Open and planned listings for one region |
//! | GET | `/api/health` | Health check with refresh progress |
//! | GET | `/api/regions` | Region codes and names in registry order |
//! | GET | `/api/metrics` | Prometheus metrics |

pub mod api;
pub mod app;
pub mod classify;
pub mod docs;

pub use api::{create_router, ErrorResponse, HealthResponse};
pub use app::{ApiServer, AppState, ServerError};
pub use classify::{is_planned, split_records, RegionBody};
