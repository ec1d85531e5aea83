//! Photo downloads for archived posts
//!
//! A photo only exists at its final path once it was downloaded completely:
//! bytes go to `<name>.unfinished` first and are renamed into place.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::client::Fetcher;
use crate::errors::{ArchiveError, Result};
use crate::models::Post;
use crate::storage::UNFINISHED_SUFFIX;

/// Extensions a photo URL may carry
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// One file to download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadItem {
    pub filename: PathBuf,
    pub url: String,
}

impl DownloadItem {
    /// Item whose extension comes from the URL when `filename` has none.
    pub fn new(filename: impl Into<PathBuf>, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let mut filename = filename.into();
        if filename.extension().is_none() {
            filename.set_extension(url_extension(&url)?);
        }
        Ok(Self { filename, url })
    }
}

/// Lower-cased image extension of a URL's path, ignoring query and fragment.
pub fn url_extension(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url)
        .map_err(|e| ArchiveError::validation(format!("invalid photo URL {}: {}", url, e)))?;
    let last = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    let Some((_, ext)) = last.rsplit_once('.') else {
        return Err(ArchiveError::validation(format!(
            "cannot get extension from URL: {}",
            url
        )));
    };

    let ext = ext.to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ArchiveError::validation(format!(
            "unexpected image extension .{} in {}",
            ext, url
        )));
    }
    Ok(ext)
}

/// Whether a `Content-Type` header value fits a file extension
pub fn content_type_matches(content_type: &str, extension: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => matches!(mime.as_str(), "image/jpeg" | "image/jpg" | "image/pjpeg"),
        "png" => mime == "image/png",
        _ => false,
    }
}

/// `<id>` from `photo_url` and `<id>_original` from `original_photo_url`.
///
/// Text-only posts contribute nothing.
pub fn items_for_posts(posts: &[Post]) -> Result<Vec<DownloadItem>> {
    let mut items = Vec::new();
    for post in posts {
        let Some(photo_url) = &post.photo_url else {
            continue;
        };
        items.push(DownloadItem::new(post.id.to_string(), photo_url.as_str())?);
        if let Some(original) = &post.original_photo_url {
            items.push(DownloadItem::new(
                format!("{}_original", post.id),
                original.as_str(),
            )?);
        }
    }
    Ok(items)
}

#[derive(Debug, Clone, Default)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: Vec<(DownloadItem, ArchiveError)>,
}

impl DownloadSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Collapse failures into one error listing every failed file
    pub fn into_result(self) -> Result<Self> {
        if self.failed.is_empty() {
            return Ok(self);
        }
        let details: Vec<String> = self
            .failed
            .iter()
            .map(|(item, err)| format!("{}: {}", item.filename.display(), err.message()))
            .collect();
        Err(ArchiveError::download(format!(
            "{} of {} downloads failed\n  {}",
            self.failed.len(),
            self.failed.len() + self.downloaded,
            details.join("\n  ")
        )))
    }
}

async fn download_one(fetcher: &dyn Fetcher, url: &str, final_path: &Path) -> Result<()> {
    let extension = final_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_string();
    if extension == UNFINISHED_SUFFIX {
        return Err(ArchiveError::validation(format!(
            "refusing to download into a temporary path: {}",
            final_path.display()
        )));
    }

    let fetched = fetcher.fetch(url).await?;
    let content_type = fetched.content_type.as_deref().unwrap_or_default();
    if !content_type_matches(content_type, &extension) {
        return Err(ArchiveError::download(format!(
            "{} shouldn't be {:?}",
            url, content_type
        )));
    }

    let temp_path = final_path.with_extension(UNFINISHED_SUFFIX);
    tokio::fs::write(&temp_path, &fetched.bytes).await?;
    tokio::fs::rename(&temp_path, final_path).await?;
    debug!("downloaded {}", final_path.display());
    Ok(())
}

/// Download `items` into `target_dir`, at most `max_concurrent` at a time.
///
/// Files already present are skipped. A failure does not stop the other
/// downloads; failures are returned in the summary.
pub async fn download_all(
    fetcher: Arc<dyn Fetcher>,
    items: Vec<DownloadItem>,
    target_dir: &Path,
    max_concurrent: usize,
) -> Result<DownloadSummary> {
    tokio::fs::create_dir_all(target_dir).await?;
    let limiter = Arc::new(Semaphore::new(max_concurrent.max(1)));

    let mut summary = DownloadSummary::default();
    let mut tasks = Vec::new();
    for item in items {
        let final_path = target_dir.join(&item.filename);
        if final_path.exists() {
            summary.skipped += 1;
            continue;
        }

        let fetcher = fetcher.clone();
        let limiter = limiter.clone();
        tasks.push(tokio::spawn(async move {
            let result = match limiter.acquire_owned().await {
                Ok(_permit) => download_one(fetcher.as_ref(), &item.url, &final_path).await,
                Err(e) => Err(ArchiveError::download(format!("limiter closed: {}", e))),
            };
            (item, result)
        }));
    }

    info!(
        "downloading {} photos ({} already present)",
        tasks.len(),
        summary.skipped
    );

    for joined in join_all(tasks).await {
        match joined {
            Ok((_, Ok(()))) => summary.downloaded += 1,
            Ok((item, Err(e))) => {
                warn!("download of {} failed: {}", item.url, e);
                summary.failed.push((item, e));
            }
            Err(e) => return Err(ArchiveError::download(format!("download task failed: {}", e))),
        }
    }

    Ok(summary)
}
