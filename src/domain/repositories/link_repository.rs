//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing links.
///
/// Implementations must enforce uniqueness of `short_name` at the storage
/// layer and report a violation as [`AppError::Conflict`]; the service-level
/// existence check is only a fast path for a better error.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if `short_name` is already taken.
    /// Returns [`AppError::Store`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by its alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn find_by_short_name(&self, short_name: &str) -> Result<Option<Link>, AppError>;

    /// Returns whether any link currently holds `short_name`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn short_name_exists(&self, short_name: &str) -> Result<bool, AppError>;

    /// Lists all links ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn list(&self) -> Result<Vec<Link>, AppError>;

    /// Lists at most `limit` links ordered by id, skipping the first `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn list_range(&self, offset: i64, limit: i64) -> Result<Vec<Link>, AppError>;

    /// Counts all links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Overwrites the mutable fields of the link with `link.id`.
    ///
    /// The caller passes fully merged values. Returns `Ok(None)` if no link
    /// with that id exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new `short_name` belongs to another link.
    /// Returns [`AppError::Store`] on storage errors.
    async fn update(&self, link: Link) -> Result<Option<Link>, AppError>;

    /// Deletes a link.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
