//! Repository trait for visit analytics.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recording and listing visits.
///
/// Visits are append-only: this interface has no update or delete.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Appends a visit and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError>;

    /// Lists all visits, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn list(&self) -> Result<Vec<Visit>, AppError>;

    /// Lists at most `limit` visits, newest first, skipping the first `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn list_range(&self, offset: i64, limit: i64) -> Result<Vec<Visit>, AppError>;

    /// Counts all visits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
