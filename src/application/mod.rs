//! Application layer services implementing business logic.
//!
//! Services consume the repository traits, enforce the link rules and put a
//! deadline on every store call. Handlers talk to services only.
//!
//! # Available Services
//!
//! - [`services::LinkService`] - link creation, update, deletion and lookup
//! - [`services::VisitService`] - alias resolution and visit analytics

pub mod services;
