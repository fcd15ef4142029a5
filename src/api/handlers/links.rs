//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
};

use crate::api::dto::link::{LinkRequest, LinkResponse};
use crate::api::dto::range::{RangeQuery, content_range};
use crate::api::extract::{ApiJson, parse_id};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/docs",
///   "short_name": "docs"   // optional, generated when absent or empty
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if the body is not valid JSON.
/// Returns 422 with per-field messages on validation failures or a taken alias.
pub async fn create_link_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let link = state
        .link_service
        .create_link(payload.original_url.unwrap_or_default(), payload.short_name)
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists links ordered by id.
///
/// # Endpoint
///
/// `GET /api/links?range=[start,end]`
///
/// The `Content-Range` response header reports the returned rows and the
/// total, e.g. `links 0-9/42`.
///
/// # Errors
///
/// Returns 400 if `range` is malformed.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<(HeaderMap, Json<Vec<LinkResponse>>), AppError> {
    let range = query.parse()?;
    let page = state.link_service.list_links(range).await?;

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&content_range("links", &page)) {
        headers.insert(header::CONTENT_RANGE, value);
    }

    let body: Vec<LinkResponse> = page.items.into_iter().map(LinkResponse::from).collect();
    Ok((headers, Json(body)))
}

/// Returns a single link.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let id = parse_id(&id)?;
    let link = state.link_service.get_link_by_id(id).await?;

    Ok(Json(link.into()))
}

/// Partially updates a link.
///
/// # Endpoint
///
/// `PUT /api/links/{id}`
///
/// Absent fields keep their value; an empty `short_name` gets a fresh
/// generated alias. `short_url` always follows the resulting `original_url`.
///
/// # Errors
///
/// Returns 400 for a bad id or body, 404 if the link does not exist and 422
/// on validation failures or an alias held by another link.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<LinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let id = parse_id(&id)?;
    let link = state
        .link_service
        .update_link(id, payload.into_patch())
        .await?;

    Ok(Json(link.into()))
}

/// Deletes a link. Recorded visits are kept.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Errors
///
/// Returns 404 if the link does not exist.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.link_service.delete_link(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
