use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One post from `posts.json`.
///
/// Fields the archiver does not interpret are kept in `extra` so a post
/// written back to disk is identical to what the server returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    /// e.g. "2022-04-01T11:22:37.000-07:00"
    pub created_at: String,
    /// e.g. "2022-04-01"; can be backdated relative to `created_at`
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_text: Option<String>,
    // missing on text-only posts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_photo_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Minimal post, mostly useful for building fixtures.
    pub fn new(id: u64, date: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            id,
            created_at: created_at.into(),
            date: date.into(),
            classroom_id: None,
            author: None,
            html: None,
            normalized_text: None,
            photo_url: None,
            medium_photo_url: None,
            large_photo_url: None,
            original_photo_url: None,
            extra: Map::new(),
        }
    }

    pub fn has_photo(&self) -> bool {
        self.photo_url.is_some()
    }
}
