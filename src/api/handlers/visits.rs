//! Handler for the visit log.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, header},
};

use crate::api::dto::range::{RangeQuery, content_range};
use crate::api::dto::visit::VisitResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists recorded visits, newest first.
///
/// # Endpoint
///
/// `GET /api/link_visits?range=[start,end]`
///
/// Sets `Content-Range: link_visits start-last/total`.
pub async fn list_visits_handler(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<(HeaderMap, Json<Vec<VisitResponse>>), AppError> {
    let range = query.parse()?;
    let page = state.visit_service.list_visits(range).await?;

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&content_range("link_visits", &page)) {
        headers.insert(header::CONTENT_RANGE, value);
    }

    let body: Vec<VisitResponse> = page.items.into_iter().map(VisitResponse::from).collect();
    Ok((headers, Json(body)))
}
