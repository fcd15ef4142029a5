//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /r/{code}`  - Alias redirect (public)
//! - `GET  /ping`      - Liveness probe
//! - `GET  /health`    - Store reachability check
//! - `/api/*`          - Link management and visit analytics
//! - anything else     - JSON 404
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configured origins, credentials allowed

use crate::api;
use crate::api::handlers::{fallback_handler, health_handler, ping_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// Trailing-slash normalisation is applied by the server around this router.
pub fn app_router(state: AppState, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/r/{code}", get(redirect_handler))
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .fallback(fallback_handler)
        .with_state(state)
        .layer(cors::layer(cors_allowed_origins))
        .layer(tracing::layer())
}
