//! Listing and archiving child posts

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::client::{ClassroomApi, Session};
use crate::errors::{ArchiveError, Result};
use crate::models::Post;
use crate::ordering::{self, OrderHypothesis, OrderReport};
use crate::storage::{ArchiveLayout, write_json};

/// Posts per page returned by `posts.json`.
///
/// The endpoint answers any explicit `per_page` with a 500, so a page
/// shorter than this is the only end-of-listing signal.
pub const POSTS_PER_PAGE: usize = 30;

/// Walk every page of a child's posts once.
pub async fn list_child_posts_once(
    api: &dyn ClassroomApi,
    token: &str,
    school_id: u64,
    child_id: u64,
) -> Result<Vec<Post>> {
    let mut posts = Vec::new();
    let mut page = 1u32;

    loop {
        debug!("requesting child {} page {}", child_id, page);
        let batch = api
            .child_posts_page(token, school_id, child_id, page)
            .await?;

        if batch.len() > POSTS_PER_PAGE {
            return Err(ArchiveError::unexpected_response(format!(
                "child {} page {} has {} posts, expected at most {}",
                child_id,
                page,
                batch.len(),
                POSTS_PER_PAGE
            )));
        }

        let last_page = batch.len() < POSTS_PER_PAGE;
        posts.extend(batch);
        if last_page {
            break;
        }
        page += 1;
    }

    Ok(posts)
}

/// List a child's posts twice and require both listings to match.
///
/// Pagination is by offset, so a post added or deleted mid-listing shifts
/// page boundaries and silently duplicates or drops an entry.
pub async fn list_child_posts(
    api: &dyn ClassroomApi,
    token: &str,
    school_id: u64,
    child_id: u64,
) -> Result<Vec<Post>> {
    let first = list_child_posts_once(api, token, school_id, child_id).await?;
    let second = list_child_posts_once(api, token, school_id, child_id).await?;
    if first != second {
        return Err(ArchiveError::consistency(format!(
            "posts changed while listing child {}",
            child_id
        )));
    }
    Ok(first)
}

/// What was archived for one child
#[derive(Debug, Clone)]
pub struct ChildPosts {
    pub child_id: u64,
    pub path: PathBuf,
    pub posts: usize,
    pub photos: usize,
    pub order: OrderReport,
}

/// Write `children/<id>/posts.json` for every child of the session.
///
/// Posts are stored in the order the server returned them.
pub async fn archive_posts(session: &Session, layout: &ArchiveLayout) -> Result<Vec<ChildPosts>> {
    let mut archived = Vec::new();

    for child_id in session.child_ids() {
        let posts =
            list_child_posts(session.api(), session.token(), session.school_id(), child_id).await?;
        info!("child {}: {} posts", child_id, posts.len());

        let order = ordering::audit(&posts);
        if let Some(result) = order.result(OrderHypothesis::ConcatenatedKey)
            && !result.is_consistent()
        {
            warn!(
                child_id,
                inversions = result.inversions,
                "listing is not ordered by {}; first inversion: {:?}",
                OrderHypothesis::ConcatenatedKey,
                result.first_inversion
            );
        }

        let path = layout.posts_file(child_id);
        write_json(&path, &posts)?;

        archived.push(ChildPosts {
            child_id,
            path,
            posts: posts.len(),
            photos: posts.iter().filter(|p| p.has_photo()).count(),
            order,
        });
    }

    Ok(archived)
}
