//! JSON 404 for unmatched routes.

use axum::{
    Json,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
};
use serde_json::json;

/// Answers any route without a handler.
///
/// ```json
/// { "error": "not_found", "message": "route not found", "path": "/nope", "method": "GET" }
/// ```
pub async fn fallback_handler(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "route not found",
            "path": uri.path(),
            "method": method.as_str(),
        })),
    )
}
