//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A short-link record (alias, derived code, target URL)
//! - [`Visit`] - A recorded redirect of a link
//!
//! Creation uses separate input structs (`NewLink`, `NewVisit`) without the
//! store-assigned id; [`LinkPatch`] carries partial updates.

pub mod link;
pub mod visit;

pub use link::{Link, LinkPatch, NewLink};
pub use visit::{NewVisit, REDIRECT_STATUS, Visit};
