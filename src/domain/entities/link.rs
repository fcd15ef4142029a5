//! Link entity representing a persisted short-link record.

/// A shortened URL mapping.
///
/// `short_name` is the alias visitors use in `/r/{code}` and is unique across
/// all links. `short_url` is a 6-character code derived from `original_url`;
/// it is shown to users but may collide and is never used for lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_name: String,
    pub short_url: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, original_url: String, short_name: String, short_url: String) -> Self {
        Self {
            id,
            original_url,
            short_name,
            short_url,
        }
    }
}

/// Input data for inserting a new link. The store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub original_url: String,
    pub short_name: String,
    pub short_url: String,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged. `short_name: Some("")` asks for a freshly
/// generated alias. `short_url` is not part of the patch: it is always
/// recomputed from the effective `original_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPatch {
    pub original_url: Option<String>,
    pub short_name: Option<String>,
}
