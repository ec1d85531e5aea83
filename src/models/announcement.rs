use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page from `frontend/announcements.json`.
///
/// The last page is `{"data":[],"pagination":{"next":null}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementPage {
    pub data: Vec<Value>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    /// Opaque cursor; in practice a `createdAt` timestamp.
    pub next: Option<String>,
}

/// Typed view over an archived announcement, used for validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: AnnouncementData,
}

impl Announcement {
    pub const KIND: &'static str = "Announcement";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementData {
    pub id: u64,
    pub created_at: String,
    pub title: String,
    pub body: String,
    pub author: AnnouncementAuthor,
    pub subject: AnnouncementSubject,
    pub attachments: Vec<Attachment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementAuthor {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementSubject {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

impl AnnouncementSubject {
    pub const KINDS: [&'static str; 2] = ["Classroom", "School"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: AttachmentData,
}

impl Attachment {
    pub const KIND: &'static str = "Attachment";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentData {
    pub id: u64,
    pub name: String,
    pub url: String,
    pub size: u64,
}
