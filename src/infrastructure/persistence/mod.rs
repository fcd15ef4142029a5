//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - link storage in PostgreSQL
//! - [`PgVisitRepository`] - visit log in PostgreSQL
//! - [`InMemoryStore`] - both repositories in process memory

pub mod memory;
pub mod pg_link_repository;
pub mod pg_visit_repository;

pub use memory::InMemoryStore;
pub use pg_link_repository::PgLinkRepository;
pub use pg_visit_repository::PgVisitRepository;
