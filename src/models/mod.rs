//! Serde types for the Transparent Classroom JSON API.

mod announcement;
mod post;
mod user;

pub use announcement::{
    Announcement, AnnouncementAuthor, AnnouncementData, AnnouncementPage, AnnouncementSubject,
    Attachment, AttachmentData, Pagination,
};
pub use post::Post;
pub use user::{Subject, UserInfo};
