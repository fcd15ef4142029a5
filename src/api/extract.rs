//! Request extractors that report failures in the API error format.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;

/// JSON body extractor whose rejection is a 400 `invalid request`.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let rejection: JsonRejection = rejection;
                debug!(error = %rejection.body_text(), "Rejected request body");
                Err(AppError::bad_request("invalid request"))
            }
        }
    }
}

/// Parses a link id taken from the path.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] with `invalid id` if `raw` is not an integer.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::bad_request("invalid id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest { .. })));
        assert!(matches!(parse_id(""), Err(AppError::BadRequest { .. })));
    }
}
