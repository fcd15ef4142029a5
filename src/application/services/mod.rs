//! Business logic services for the application layer.

mod deadline;
pub mod link_service;
pub mod visit_service;

pub use deadline::DEFAULT_STORE_TIMEOUT;
pub use link_service::LinkService;
pub use visit_service::VisitService;
