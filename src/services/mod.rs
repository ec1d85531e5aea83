//! Archiving workflows built on the client and storage layers

pub mod announcements;
pub mod photos;
pub mod posts;

pub use photos::{DownloadItem, DownloadSummary, download_all, items_for_posts};
pub use posts::{ChildPosts, POSTS_PER_PAGE, archive_posts, list_child_posts, list_child_posts_once};
