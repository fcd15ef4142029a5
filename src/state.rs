//! Shared application state injected into all handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{LinkService, VisitService};
use crate::domain::repositories::{LinkRepository, VisitRepository};

/// Services and request-handling settings shared by every handler.
///
/// Cheap to clone: all services sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub visit_service: Arc<VisitService<dyn LinkRepository, dyn VisitRepository>>,
    /// Take the client IP from forwarding headers instead of the peer address.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the services over the given repositories.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        visit_repository: Arc<dyn VisitRepository>,
        store_timeout: Duration,
        behind_proxy: bool,
    ) -> Self {
        let link_service = Arc::new(LinkService::with_store_timeout(
            link_repository,
            store_timeout,
        ));
        let visit_service = Arc::new(VisitService::with_store_timeout(
            Arc::clone(&link_service),
            visit_repository,
            store_timeout,
        ));

        Self {
            link_service,
            visit_service,
            behind_proxy,
        }
    }
}
