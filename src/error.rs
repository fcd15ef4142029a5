//! Application error taxonomy and its HTTP representation.
//!
//! Every error carries a stable machine-readable kind (see [`AppError::kind`])
//! and a human-readable message. Field-level problems additionally carry a
//! `field -> message` map.
//!
//! # Response Body
//!
//! ```json
//! {
//!   "error": { "code": "validation_error", "message": "Validation failed" },
//!   "errors": { "short_name": "length must be between 3 and 32 characters" }
//! }
//! ```

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::utils::db_error::is_unique_violation_on_short_name;
use crate::utils::link_validator::FieldViolations;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<&'static str, String>>,
}

/// Kind and message of an error as exposed to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
}

/// Errors produced by the services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// One or more request fields broke the link rules. Never retried.
    #[error("validation failed: {}", summarize(.violations))]
    Validation { violations: FieldViolations },

    /// The requested alias is held by another link.
    #[error("{field} already exists")]
    Conflict { field: &'static str },

    /// Syntactically malformed input (bad id, bad range, unparsable body).
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Unexpected failure of the persistence layer. Details stay in the logs.
    #[error("store error: {message}")]
    Store { message: String },

    /// A store call exceeded its deadline and was abandoned.
    #[error("{operation} cancelled: deadline exceeded")]
    Cancelled { operation: &'static str },
}

fn summarize(violations: &FieldViolations) -> String {
    violations
        .iter()
        .map(|(field, violation)| format!("{field}: {violation}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    pub fn validation(violations: FieldViolations) -> Self {
        Self::Validation { violations }
    }

    pub fn conflict(field: &'static str) -> Self {
        Self::Conflict { field }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn cancelled(operation: &'static str) -> Self {
        Self::Cancelled { operation }
    }

    /// Stable machine-readable kind of this error.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::Conflict { .. } => "conflict",
            AppError::BadRequest { .. } => "bad_request",
            AppError::NotFound { .. } => "not_found",
            AppError::Store { .. } => "store_error",
            AppError::Cancelled { .. } => "cancelled",
        }
    }

    /// HTTP status used when the error reaches a client.
    ///
    /// Alias conflicts are reported like validation failures (422 on the
    /// `short_name` field) so clients can render them next to the input.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::Conflict { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Cancelled { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Converts the error into the client-facing kind and message.
    pub fn to_error_info(&self) -> ErrorInfo {
        let message = match self {
            AppError::Validation { .. } => "Validation failed".to_string(),
            AppError::Store { .. } => "internal server error".to_string(),
            other => other.to_string(),
        };

        ErrorInfo {
            code: self.kind(),
            message,
        }
    }

    fn field_errors(&self) -> Option<BTreeMap<&'static str, String>> {
        match self {
            AppError::Validation { violations } => Some(
                violations
                    .iter()
                    .map(|(field, violation)| (*field, violation.to_string()))
                    .collect(),
            ),
            AppError::Conflict { field } => {
                Some(BTreeMap::from([(*field, "already exists".to_string())]))
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store { message } = &self {
            tracing::error!(error = %message, "Store operation failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
            errors: self.field_errors(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_short_name(&e) {
            return AppError::conflict("short_name");
        }

        AppError::store(e.to_string())
    }
}
