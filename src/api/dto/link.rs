//! DTOs for the link endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Link, LinkPatch};

/// Request body for `POST /api/links` and `PUT /api/links/{id}`.
///
/// A missing `original_url` is treated like an empty one so it is reported
/// as a field violation rather than a malformed body.
#[derive(Debug, Default, Deserialize)]
pub struct LinkRequest {
    #[serde(default)]
    pub original_url: Option<String>,

    #[serde(default)]
    pub short_name: Option<String>,
}

impl LinkRequest {
    /// Turns an update body into a patch. Absent fields stay untouched.
    pub fn into_patch(self) -> LinkPatch {
        LinkPatch {
            original_url: self.original_url,
            short_name: self.short_name,
        }
    }
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_name: String,
    pub short_url: String,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_name: link.short_name,
            short_url: link.short_url,
        }
    }
}
