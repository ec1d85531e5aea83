//! `ureq`-backed implementations of `ClassroomApi` and `Fetcher`

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use ureq::Agent;

use super::{ClassroomApi, Fetched, Fetcher, TOKEN_HEADER};
use crate::config::{ApiConfig, Credentials};
use crate::errors::{ArchiveError, Result};
use crate::models::{AnnouncementPage, Post, Subject, UserInfo};

fn build_agent(timeout_secs: u64) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(timeout_secs)))
        .build()
        .into()
}

fn request_error(url: &str, err: ureq::Error) -> ArchiveError {
    match ArchiveError::from(err) {
        ArchiveError::Auth(msg) => ArchiveError::auth(format!("{} ({})", msg, url)),
        other => ArchiveError::http(format!("GET {} failed: {}", url, other.message())),
    }
}

/// Run a blocking request on the blocking pool
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ArchiveError::http(format!("request task failed: {}", e)))?
}

fn get_json_sync<T: DeserializeOwned>(
    agent: &Agent,
    url: &str,
    header: Option<(&str, &str)>,
) -> Result<T> {
    trace!("GET {}", url);
    let mut request = agent.get(url);
    if let Some((name, value)) = header {
        request = request.header(name, value);
    }
    let response = request.call().map_err(|e| request_error(url, e))?;
    response
        .into_body()
        .read_json::<T>()
        .map_err(|e| ArchiveError::unexpected_response(format!("{}: {}", url, e)))
}

/// Transparent Classroom JSON API over HTTPS
#[derive(Clone)]
pub struct HttpClassroomApi {
    base_url: String,
    agent: Agent,
}

impl HttpClassroomApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            agent: build_agent(config.timeout_secs),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_with_token<T>(&self, url: String, token: &str) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let agent = self.agent.clone();
        let token = token.to_string();
        run_blocking(move || get_json_sync(&agent, &url, Some((TOKEN_HEADER, token.as_str()))))
            .await
    }
}

pub(crate) fn basic_auth_value(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.username, credentials.password);
    format!("Basic {}", STANDARD.encode(raw))
}

#[async_trait]
impl ClassroomApi for HttpClassroomApi {
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserInfo> {
        let url = self.url("/api/v1/authenticate.json");
        let agent = self.agent.clone();
        let auth = basic_auth_value(credentials);
        debug!("Authenticating as {}", credentials.username);
        run_blocking(move || {
            get_json_sync(&agent, &url, Some(("Authorization", auth.as_str())))
        })
        .await
    }

    async fn my_subjects(&self, token: &str, school_id: u64) -> Result<Vec<Subject>> {
        let url = self.url(&format!("/s/{}/users/my_subjects.json", school_id));
        self.get_with_token(url, token).await
    }

    async fn child_posts_page(
        &self,
        token: &str,
        school_id: u64,
        child_id: u64,
        page: u32,
    ) -> Result<Vec<Post>> {
        let url = self.url(&format!(
            "/s/{}/children/{}/posts.json?page={}",
            school_id, child_id, page
        ));
        self.get_with_token(url, token).await
    }

    async fn announcements_page(
        &self,
        token: &str,
        school_id: u64,
        cursor: Option<&str>,
    ) -> Result<AnnouncementPage> {
        let mut url = url::Url::parse(&self.url(&format!(
            "/s/{}/frontend/announcements.json",
            school_id
        )))
        .map_err(|e| ArchiveError::config(format!("invalid API base URL: {}", e)))?;
        if let Some(cursor) = cursor {
            url.query_pairs_mut().append_pair("page", cursor);
        }
        self.get_with_token(url.to_string(), token).await
    }
}

/// Plain GET downloader for photo URLs
#[derive(Clone)]
pub struct HttpFetcher {
    agent: Agent,
}

impl HttpFetcher {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            agent: build_agent(config.timeout_secs),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched> {
        let agent = self.agent.clone();
        let url = url.to_string();
        run_blocking(move || {
            trace!("GET {}", url);
            let response = agent.get(&url).call().map_err(|e| request_error(&url, e))?;
            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let bytes = response
                .into_body()
                .with_config()
                .limit(u64::MAX)
                .read_to_vec()
                .map_err(|e| ArchiveError::download(format!("{}: {}", url, e)))?;
            Ok(Fetched {
                content_type,
                bytes,
            })
        })
        .await
    }
}
