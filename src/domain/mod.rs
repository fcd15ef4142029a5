//! Domain layer containing business entities and storage contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`pagination`] - Row ranges and pages for list operations
//!
//! Business rules (alias arbitration, partial updates, visit recording) live
//! in [`crate::application::services`].

pub mod entities;
pub mod pagination;
pub mod repositories;
