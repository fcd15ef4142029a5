//! Link lifecycle service: creation, update, deletion and lookup.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::application::services::deadline::{DEFAULT_STORE_TIMEOUT, with_deadline};
use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::pagination::{Page, RangeSpec};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::link_validator::{
    FieldViolations, check_original_url, check_short_name, validate,
};
use crate::utils::short_code::{generate_alias, generate_code};

/// Service that turns link requests into stored links.
///
/// Enforces the alias uniqueness invariant and picks the effective alias:
/// the caller's choice when given, a generated token otherwise. The derived
/// `short_url` is always recomputed from the target URL and never taken from
/// input.
///
/// # Races
///
/// The alias existence check before a write is a fast path that yields a
/// clean error. Two requests racing for one alias can both pass it; the
/// repository's unique constraint then rejects the loser with
/// [`AppError::Conflict`].
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    store_timeout: Duration,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service with the default store deadline.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self::with_store_timeout(link_repository, DEFAULT_STORE_TIMEOUT)
    }

    /// Creates a new link service whose store calls are abandoned after
    /// `store_timeout`.
    pub fn with_store_timeout(link_repository: Arc<L>, store_timeout: Duration) -> Self {
        Self {
            link_repository,
            store_timeout,
        }
    }

    /// Creates a link.
    ///
    /// An empty or absent `short_name` gets a generated alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the input breaks the link rules.
    /// Returns [`AppError::Conflict`] if the alias is taken; nothing is written
    /// when this is detected before the insert.
    /// Returns [`AppError::Store`] or [`AppError::Cancelled`] on store failures.
    pub async fn create_link(
        &self,
        original_url: String,
        short_name: Option<String>,
    ) -> Result<Link, AppError> {
        let short_name = short_name.unwrap_or_default();

        let violations = validate(&original_url, &short_name);
        if !violations.is_empty() {
            return Err(AppError::validation(violations));
        }

        let short_name = if short_name.is_empty() {
            generate_alias()
        } else {
            if self.short_name_exists(&short_name).await? {
                return Err(AppError::conflict("short_name"));
            }
            short_name
        };

        let new_link = NewLink {
            short_url: generate_code(&original_url),
            original_url,
            short_name,
        };

        let link = with_deadline(
            self.store_timeout,
            "create_link",
            self.link_repository.create(new_link),
        )
        .await?;

        info!(id = link.id, short_name = %link.short_name, "Link created");
        metrics::counter!("links_created_total").increment(1);

        Ok(link)
    }

    /// Applies a partial update to a link and returns the merged result.
    ///
    /// Fields left `None` keep their stored value. `short_name: Some("")`
    /// replaces the alias with a generated one. Supplying the link's own
    /// current alias is not a conflict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a supplied field breaks the rules.
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Conflict`] if the alias belongs to another link.
    /// Returns [`AppError::Store`] or [`AppError::Cancelled`] on store failures.
    pub async fn update_link(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        let mut violations = FieldViolations::new();
        if let Some(original_url) = patch.original_url.as_deref()
            && let Some(violation) = check_original_url(original_url)
        {
            violations.insert("original_url", violation);
        }
        if let Some(short_name) = patch.short_name.as_deref()
            && let Some(violation) = check_short_name(short_name)
        {
            violations.insert("short_name", violation);
        }
        if !violations.is_empty() {
            return Err(AppError::validation(violations));
        }

        let current = self.get_link_by_id(id).await?;

        let short_name = match patch.short_name {
            None => current.short_name,
            Some(name) if name.is_empty() => generate_alias(),
            Some(name) => {
                if name != current.short_name && self.short_name_exists(&name).await? {
                    return Err(AppError::conflict("short_name"));
                }
                name
            }
        };

        let original_url = patch.original_url.unwrap_or(current.original_url);
        let short_url = generate_code(&original_url);
        let merged = Link::new(id, original_url, short_name, short_url);

        let link = with_deadline(
            self.store_timeout,
            "update_link",
            self.link_repository.update(merged),
        )
        .await?
        .ok_or_else(|| AppError::not_found("link"))?;

        info!(id = link.id, short_name = %link.short_name, "Link updated");
        metrics::counter!("links_updated_total").increment(1);

        Ok(link)
    }

    /// Deletes a link. Its recorded visits are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id, matching
    /// [`Self::get_link_by_id`].
    /// Returns [`AppError::Store`] or [`AppError::Cancelled`] on store failures.
    pub async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        let deleted = with_deadline(
            self.store_timeout,
            "delete_link",
            self.link_repository.delete(id),
        )
        .await?;

        if !deleted {
            return Err(AppError::not_found("link"));
        }

        info!(id, "Link deleted");
        metrics::counter!("links_deleted_total").increment(1);

        Ok(())
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Store`] or [`AppError::Cancelled`] on store failures.
    pub async fn get_link_by_id(&self, id: i64) -> Result<Link, AppError> {
        with_deadline(
            self.store_timeout,
            "find_link_by_id",
            self.link_repository.find_by_id(id),
        )
        .await?
        .ok_or_else(|| AppError::not_found("link"))
    }

    /// Retrieves a link by alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link holds this alias.
    /// Returns [`AppError::Store`] or [`AppError::Cancelled`] on store failures.
    pub async fn get_link_by_short_name(&self, short_name: &str) -> Result<Link, AppError> {
        with_deadline(
            self.store_timeout,
            "find_link_by_short_name",
            self.link_repository.find_by_short_name(short_name),
        )
        .await?
        .ok_or_else(|| AppError::not_found("link"))
    }

    /// Lists links ordered by id, optionally restricted to a row range.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] or [`AppError::Cancelled`] on store failures.
    pub async fn list_links(&self, range: Option<RangeSpec>) -> Result<Page<Link>, AppError> {
        let total = with_deadline(
            self.store_timeout,
            "count_links",
            self.link_repository.count(),
        )
        .await?;

        let (start, items) = match range {
            Some(range) => (
                range.start(),
                with_deadline(
                    self.store_timeout,
                    "list_links",
                    self.link_repository.list_range(range.offset(), range.limit()),
                )
                .await?,
            ),
            None => (
                0,
                with_deadline(self.store_timeout, "list_links", self.link_repository.list())
                    .await?,
            ),
        };

        Ok(Page {
            items,
            start,
            total,
        })
    }

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] or [`AppError::Cancelled`] on store failures.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        with_deadline(
            self.store_timeout,
            "count_links",
            self.link_repository.count(),
        )
        .await
    }

    async fn short_name_exists(&self, short_name: &str) -> Result<bool, AppError> {
        with_deadline(
            self.store_timeout,
            "short_name_exists",
            self.link_repository.short_name_exists(short_name),
        )
        .await
    }
}
