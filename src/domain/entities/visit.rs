//! Visit entity representing a single successful redirect.

use chrono::{DateTime, Utc};

/// HTTP status stored on every visit produced by a successful redirect.
pub const REDIRECT_STATUS: i32 = 302;

/// A recorded redirect of a link.
///
/// Visits reference links by id only; deleting a link does not remove its
/// visits. Request provenance fields may be empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub id: i64,
    pub link_id: i64,
    pub ip: String,
    pub user_agent: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    pub link_id: i64,
    pub ip: String,
    pub user_agent: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
}

impl NewVisit {
    /// Builds a visit for a successful redirect, stamped with the current time.
    pub fn redirect(link_id: i64, ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            link_id,
            ip: ip.into(),
            user_agent: user_agent.into(),
            status: REDIRECT_STATUS,
            created_at: Utc::now(),
        }
    }
}
