//! Handler for alias redirects.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects an alias to its original URL.
///
/// # Endpoint
///
/// `GET /r/{code}`
///
/// `code` is matched against the link's `short_name`; the derived
/// `short_url` code is never used for lookups.
///
/// # Request Flow
///
/// 1. Resolve the alias
/// 2. Record a visit with client IP and `User-Agent`
/// 3. Return 302 Found with `Location`
///
/// A visit that cannot be stored does not fail the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if no link holds the alias.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let ip = client_ip(&headers, peer, state.behind_proxy);
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let target = state
        .visit_service
        .resolve_and_record(&code, &ip, user_agent)
        .await?;

    let location = HeaderValue::from_str(&target)
        .map_err(|_| AppError::store(format!("stored URL is not a valid header value: {target}")))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
