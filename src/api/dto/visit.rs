//! DTO for the visit listing endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Visit;

/// JSON representation of a recorded visit.
#[derive(Debug, Serialize, Deserialize)]
pub struct VisitResponse {
    pub id: i64,
    pub link_id: i64,
    pub ip: String,
    pub user_agent: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Visit> for VisitResponse {
    fn from(visit: Visit) -> Self {
        Self {
            id: visit.id,
            link_id: visit.link_id,
            ip: visit.ip,
            user_agent: visit.user_agent,
            status: visit.status,
            created_at: visit.created_at,
        }
    }
}
