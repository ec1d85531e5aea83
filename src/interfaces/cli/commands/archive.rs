//! `archive`, `posts` and `photos` commands

use colored::Colorize;
use tracing::info;

use crate::errors::Result;
use crate::interfaces::cli::CliContext;
use crate::services::{self, ChildPosts};

/// Archive posts (unless `refresh_posts` is false), then fetch their photos
pub async fn archive(ctx: &CliContext, refresh_posts: bool) -> Result<()> {
    if refresh_posts {
        update_posts(ctx).await?;
    } else {
        info!("Not retrieving posts");
    }
    download_photos(ctx).await
}

/// Log in and write `posts.json` for every child
pub async fn update_posts(ctx: &CliContext) -> Result<Vec<ChildPosts>> {
    let session = ctx.login().await?;
    let archived = services::archive_posts(&session, &ctx.layout).await?;
    for child in &archived {
        println!(
            "{} child {}: {} posts, {} with photos -> {}",
            "✓".green(),
            child.child_id.to_string().cyan(),
            child.posts,
            child.photos,
            child.path.display()
        );
    }
    Ok(archived)
}

/// Download photos for every `children/*/posts.json` on disk
pub async fn download_photos(ctx: &CliContext) -> Result<()> {
    let files = ctx.layout.archived_posts_files()?;
    if files.is_empty() {
        println!(
            "{} no archived posts under {}",
            "!".yellow(),
            ctx.layout.root().display()
        );
        return Ok(());
    }

    let mut items = Vec::new();
    for (child_id, path) in &files {
        let posts = ctx.layout.read_posts(path)?;
        let child_items = services::items_for_posts(&posts)?;
        info!("child {}: {} photo files", child_id, child_items.len());
        items.extend(child_items);
    }
    // Posts tagged with several children appear in several listings
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.filename.clone()));

    let summary = services::download_all(
        ctx.fetcher(),
        items,
        &ctx.layout.photos_dir(),
        ctx.config.archive.max_concurrent_downloads,
    )
    .await?;

    println!(
        "{} {} downloaded, {} already present, {} failed",
        "photos:".bold(),
        summary.downloaded.to_string().green(),
        summary.skipped,
        summary.failed.len().to_string().red()
    );
    summary.into_result().map(|_| ())
}
