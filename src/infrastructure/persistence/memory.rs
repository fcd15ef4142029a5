//! In-process store implementing both repositories.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{Link, NewLink, NewVisit, Visit};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    links: BTreeMap<i64, Link>,
    visits: Vec<Visit>,
    next_link_id: i64,
    next_visit_id: i64,
}

impl Tables {
    fn alias_holder(&self, short_name: &str) -> Option<i64> {
        self.links
            .values()
            .find(|link| link.short_name == short_name)
            .map(|link| link.id)
    }

    /// Visits newest first, ties broken by the higher id.
    fn visits_newest_first(&self) -> Vec<Visit> {
        let mut visits = self.visits.clone();
        visits.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        visits
    }
}

/// Store keeping links and visits in memory.
///
/// Nothing survives a restart. Alias uniqueness is checked under the write
/// lock, so concurrent inserts of one alias behave like the unique constraint
/// of the database backend: exactly one wins.
///
/// # Use Cases
///
/// - Local development without PostgreSQL (`STORAGE_BACKEND=memory`)
/// - Handler and service tests
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory store (data is not persisted)");
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn window<T: Clone>(items: impl Iterator<Item = T>, offset: i64, limit: i64) -> Vec<T> {
    items
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut tables = self.tables.write().await;

        if tables.alias_holder(&new_link.short_name).is_some() {
            return Err(AppError::conflict("short_name"));
        }

        tables.next_link_id += 1;
        let link = Link::new(
            tables.next_link_id,
            new_link.original_url,
            new_link.short_name,
            new_link.short_url,
        );
        tables.links.insert(link.id, link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.tables.read().await.links.get(&id).cloned())
    }

    async fn find_by_short_name(&self, short_name: &str) -> Result<Option<Link>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .links
            .values()
            .find(|link| link.short_name == short_name)
            .cloned())
    }

    async fn short_name_exists(&self, short_name: &str) -> Result<bool, AppError> {
        Ok(self.tables.read().await.alias_holder(short_name).is_some())
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        Ok(self.tables.read().await.links.values().cloned().collect())
    }

    async fn list_range(&self, offset: i64, limit: i64) -> Result<Vec<Link>, AppError> {
        let tables = self.tables.read().await;
        Ok(window(tables.links.values().cloned(), offset, limit))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.links.len() as i64)
    }

    async fn update(&self, link: Link) -> Result<Option<Link>, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.links.contains_key(&link.id) {
            return Ok(None);
        }
        if let Some(holder) = tables.alias_holder(&link.short_name)
            && holder != link.id
        {
            return Err(AppError::conflict("short_name"));
        }

        tables.links.insert(link.id, link.clone());
        Ok(Some(link))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.links.remove(&id).is_some())
    }
}

#[async_trait]
impl VisitRepository for InMemoryStore {
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let mut tables = self.tables.write().await;

        tables.next_visit_id += 1;
        let visit = Visit {
            id: tables.next_visit_id,
            link_id: new_visit.link_id,
            ip: new_visit.ip,
            user_agent: new_visit.user_agent,
            status: new_visit.status,
            created_at: new_visit.created_at,
        };
        tables.visits.push(visit.clone());

        Ok(visit)
    }

    async fn list(&self) -> Result<Vec<Visit>, AppError> {
        Ok(self.tables.read().await.visits_newest_first())
    }

    async fn list_range(&self, offset: i64, limit: i64) -> Result<Vec<Visit>, AppError> {
        let visits = self.tables.read().await.visits_newest_first();
        Ok(window(visits.into_iter(), offset, limit))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.visits.len() as i64)
    }
}
