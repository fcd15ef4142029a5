//! Utility functions used across the application.
//!
//! - [`short_code`] - Short code derivation and alias generation
//! - [`link_validator`] - Syntactic rules for link input
//! - [`client_ip`] - Client address resolution for visit records
//! - [`db_error`] - Database error classification

pub mod client_ip;
pub mod db_error;
pub mod link_validator;
pub mod short_code;
