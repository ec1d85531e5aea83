use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{ArchiveError, Result};
use crate::models::Post;

/// Suffix for files that are still being written
pub const UNFINISHED_SUFFIX: &str = "unfinished";

/// Paths inside an archive root
///
/// ```text
/// <root>/children/<child_id>/posts.json
/// <root>/photos/<post_id>[_original].<ext>
/// <root>/announcements.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    root: PathBuf,
}

impl ArchiveLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn children_dir(&self) -> PathBuf {
        self.root.join("children")
    }

    pub fn child_dir(&self, child_id: u64) -> PathBuf {
        self.children_dir().join(child_id.to_string())
    }

    pub fn posts_file(&self, child_id: u64) -> PathBuf {
        self.child_dir(child_id).join("posts.json")
    }

    pub fn photos_dir(&self) -> PathBuf {
        self.root.join("photos")
    }

    pub fn announcements_file(&self) -> PathBuf {
        self.root.join("announcements.json")
    }

    /// Every `children/<id>/posts.json` present, ordered by child id.
    ///
    /// Directories whose name is not a number are ignored.
    pub fn archived_posts_files(&self) -> Result<Vec<(u64, PathBuf)>> {
        let dir = self.children_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let Some(child_id) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<u64>().ok())
            else {
                continue;
            };
            let posts = entry.path().join("posts.json");
            if posts.is_file() {
                found.push((child_id, posts));
            }
        }
        found.sort_by_key(|(id, _)| *id);
        Ok(found)
    }

    pub fn read_posts(&self, path: &Path) -> Result<Vec<Post>> {
        read_json(path)
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ArchiveError::file_operation(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| ArchiveError::serialization(format!("{}: {}", path.display(), e)))
}

/// Pretty-print `value` to `path` via a sibling temp file and a rename,
/// so readers never observe a half-written file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(value)?;
    let temp = path.with_extension(format!("json.{}", UNFINISHED_SUFFIX));
    fs::write(&temp, content)?;
    fs::rename(&temp, path)?;
    debug!("Wrote {}", path.display());
    Ok(())
}
