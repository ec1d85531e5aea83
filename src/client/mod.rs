//! Client layer for the Transparent Classroom API
//!
//! # Architecture
//!
//! ```text
//! commands → Session ──→ ClassroomApi (JSON endpoints)
//! photos   ───────────→ Fetcher      (raw image bytes)
//! ```
//!
//! Both seams are traits so services can be driven by in-memory fakes.
//! The HTTP implementations share one blocking `ureq` agent and run each
//! request on tokio's blocking pool.

mod http;
mod session;

pub use http::{HttpClassroomApi, HttpFetcher};
pub use session::Session;

use async_trait::async_trait;

use crate::config::Credentials;
use crate::errors::Result;
use crate::models::{AnnouncementPage, Post, Subject, UserInfo};

/// Header carrying the per-user API token on every authenticated request
pub const TOKEN_HEADER: &str = "X-TransparentClassroomToken";

/// JSON endpoints used by the archiver.
///
/// Every call except `authenticate` takes the `api_token` from `UserInfo`.
#[async_trait]
pub trait ClassroomApi: Send + Sync {
    /// `GET /api/v1/authenticate.json` with HTTP Basic credentials
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserInfo>;

    /// `GET /s/{school}/users/my_subjects.json`
    async fn my_subjects(&self, token: &str, school_id: u64) -> Result<Vec<Subject>>;

    /// `GET /s/{school}/children/{child}/posts.json?page={page}`, pages start at 1
    async fn child_posts_page(
        &self,
        token: &str,
        school_id: u64,
        child_id: u64,
        page: u32,
    ) -> Result<Vec<Post>>;

    /// `GET /s/{school}/frontend/announcements.json[?page={cursor}]`
    async fn announcements_page(
        &self,
        token: &str,
        school_id: u64,
        cursor: Option<&str>,
    ) -> Result<AnnouncementPage>;
}

/// Body and declared type of a downloaded resource
#[derive(Debug, Clone)]
pub struct Fetched {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Downloads a single URL. Photo URLs are pre-signed, so no token is sent.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Fetched>;
}
