//! Link resolution and visit analytics.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::application::services::LinkService;
use crate::application::services::deadline::{DEFAULT_STORE_TIMEOUT, with_deadline};
use crate::domain::entities::{NewVisit, Visit};
use crate::domain::pagination::{Page, RangeSpec};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;

/// Service resolving aliases to their target URL and recording each redirect.
pub struct VisitService<L, V>
where
    L: LinkRepository + ?Sized,
    V: VisitRepository + ?Sized,
{
    link_service: Arc<LinkService<L>>,
    visit_repository: Arc<V>,
    store_timeout: Duration,
}

impl<L, V> VisitService<L, V>
where
    L: LinkRepository + ?Sized,
    V: VisitRepository + ?Sized,
{
    pub fn new(link_service: Arc<LinkService<L>>, visit_repository: Arc<V>) -> Self {
        Self::with_store_timeout(link_service, visit_repository, DEFAULT_STORE_TIMEOUT)
    }

    pub fn with_store_timeout(
        link_service: Arc<LinkService<L>>,
        visit_repository: Arc<V>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            link_service,
            visit_repository,
            store_timeout,
        }
    }

    /// Resolves an alias to the URL to redirect to and records the visit.
    ///
    /// A failure to record the visit is logged and counted but does not fail
    /// the redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link holds the alias; no visit is
    /// recorded in that case.
    /// Returns [`AppError::Store`] or [`AppError::Cancelled`] if the lookup fails.
    pub async fn resolve_and_record(
        &self,
        short_name: &str,
        ip: &str,
        user_agent: &str,
    ) -> Result<String, AppError> {
        let link = self.link_service.get_link_by_short_name(short_name).await?;

        let visit = NewVisit::redirect(link.id, ip, user_agent);
        match with_deadline(
            self.store_timeout,
            "record_visit",
            self.visit_repository.record(visit),
        )
        .await
        {
            Ok(visit) => {
                debug!(link_id = link.id, visit_id = visit.id, "Visit recorded");
            }
            Err(e) => {
                warn!(link_id = link.id, error = %e, "Failed to record visit");
                metrics::counter!("visits_dropped_total").increment(1);
            }
        }

        metrics::counter!("redirects_total").increment(1);

        Ok(link.original_url)
    }

    /// Lists visits newest first, optionally restricted to a row range.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] or [`AppError::Cancelled`] on store failures.
    pub async fn list_visits(&self, range: Option<RangeSpec>) -> Result<Page<Visit>, AppError> {
        let total = with_deadline(
            self.store_timeout,
            "count_visits",
            self.visit_repository.count(),
        )
        .await?;

        let (start, items) = match range {
            Some(range) => (
                range.start(),
                with_deadline(
                    self.store_timeout,
                    "list_visits",
                    self.visit_repository.list_range(range.offset(), range.limit()),
                )
                .await?,
            ),
            None => (
                0,
                with_deadline(
                    self.store_timeout,
                    "list_visits",
                    self.visit_repository.list(),
                )
                .await?,
            ),
        };

        Ok(Page {
            items,
            start,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Link, REDIRECT_STATUS};
    use crate::domain::repositories::{MockLinkRepository, MockVisitRepository};
    use chrono::Utc;

    fn service(
        links: MockLinkRepository,
        visits: MockVisitRepository,
    ) -> VisitService<MockLinkRepository, MockVisitRepository> {
        VisitService::new(
            Arc::new(LinkService::new(Arc::new(links))),
            Arc::new(visits),
        )
    }

    fn link_with_alias(id: i64, short_name: &str) -> Link {
        Link::new(
            id,
            "https://example.com/target".to_string(),
            short_name.to_string(),
            "abcdef".to_string(),
        )
    }

    #[tokio::test]
    async fn test_resolve_records_visit_for_link() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_short_name()
            .withf(|name| name == "docs")
            .times(1)
            .returning(|name| Ok(Some(link_with_alias(9, name))));

        let mut visits = MockVisitRepository::new();
        visits
            .expect_record()
            .withf(|visit| {
                visit.link_id == 9
                    && visit.ip == "203.0.113.7"
                    && visit.user_agent == "curl/8.0"
                    && visit.status == REDIRECT_STATUS
            })
            .times(1)
            .returning(|visit| {
                Ok(Visit {
                    id: 1,
                    link_id: visit.link_id,
                    ip: visit.ip,
                    user_agent: visit.user_agent,
                    status: visit.status,
                    created_at: visit.created_at,
                })
            });

        let target = service(links, visits)
            .resolve_and_record("docs", "203.0.113.7", "curl/8.0")
            .await
            .unwrap();

        assert_eq!(target, "https://example.com/target");
    }

    #[tokio::test]
    async fn test_unknown_alias_records_nothing() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_short_name()
            .times(1)
            .returning(|_| Ok(None));

        let mut visits = MockVisitRepository::new();
        visits.expect_record().times(0);

        let result = service(links, visits)
            .resolve_and_record("nope", "", "")
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_record_failure_still_redirects() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_short_name()
            .times(1)
            .returning(|name| Ok(Some(link_with_alias(3, name))));

        let mut visits = MockVisitRepository::new();
        visits
            .expect_record()
            .times(1)
            .returning(|_| Err(AppError::store("disk full")));

        let target = service(links, visits)
            .resolve_and_record("docs", "", "")
            .await
            .unwrap();

        assert_eq!(target, "https://example.com/target");
    }

    #[tokio::test]
    async fn test_list_visits_with_range() {
        let links = MockLinkRepository::new();
        let mut visits = MockVisitRepository::new();
        visits.expect_count().times(1).returning(|| Ok(3));
        visits
            .expect_list_range()
            .withf(|offset, limit| *offset == 1 && *limit == 2)
            .times(1)
            .returning(|_, _| {
                Ok(vec![Visit {
                    id: 2,
                    link_id: 1,
                    ip: String::new(),
                    user_agent: String::new(),
                    status: REDIRECT_STATUS,
                    created_at: Utc::now(),
                }])
            });

        let page = service(links, visits)
            .list_visits(Some(RangeSpec::new(1, 2).unwrap()))
            .await
            .unwrap();

        assert_eq!(page.start, 1);
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.last(), Some(1));
    }
}
