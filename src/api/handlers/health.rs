//! Handlers for liveness and health endpoints.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse, PingResponse};
use crate::state::AppState;

/// Liveness probe.
///
/// # Endpoint
///
/// `GET /ping`
///
/// ```json
/// { "message": "pong", "time": "2026-01-01T12:00:00Z" }
/// ```
pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong",
        time: Utc::now(),
    })
}

/// Returns service health with a store reachability check.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: store reachable
/// - **503 Service Unavailable**: store query failed or timed out
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store = match state.link_service.count_links().await {
        Ok(count) => CheckStatus {
            status: "ok",
            message: Some(format!("Connected, {count} links")),
        },
        Err(e) => CheckStatus {
            status: "error",
            message: Some(e.to_error_info().message),
        },
    };

    let healthy = store.status == "ok";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { store },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
