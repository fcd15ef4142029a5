//! DTOs for the liveness and health endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Response of `GET /ping`.
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
    pub time: DateTime<Utc>,
}

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: CheckStatus,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
