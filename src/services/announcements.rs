//! School and classroom announcements

use serde_json::Value;
use tracing::{debug, info};

use crate::client::Session;
use crate::errors::{ArchiveError, Result};
use crate::models::{Announcement, AnnouncementSubject, Attachment};
use crate::storage::{ArchiveLayout, write_json};

/// Follow `pagination.next` until the server returns `null`.
///
/// Entries are kept as raw JSON so nothing is lost on disk.
pub async fn fetch_all(session: &Session) -> Result<Vec<Value>> {
    let mut announcements = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = session
            .api()
            .announcements_page(session.token(), session.school_id(), cursor.as_deref())
            .await?;
        announcements.extend(page.data);

        match page.pagination.next {
            Some(next) => {
                if cursor.as_deref() == Some(next.as_str()) {
                    return Err(ArchiveError::unexpected_response(format!(
                        "announcements cursor did not advance past {}",
                        next
                    )));
                }
                debug!("next announcements page: {}", next);
                cursor = Some(next);
            }
            None => break,
        }
    }

    Ok(announcements)
}

/// Fetch every announcement and write `announcements.json`.
pub async fn archive_announcements(session: &Session, layout: &ArchiveLayout) -> Result<usize> {
    let announcements = fetch_all(session).await?;
    write_json(&layout.announcements_file(), &announcements)?;
    info!("{} announcements", announcements.len());
    Ok(announcements.len())
}

/// Check archived announcements have the expected shape; returns the count.
pub fn validate(announcements: &[Value]) -> Result<usize> {
    for (index, raw) in announcements.iter().enumerate() {
        let announcement: Announcement = serde_json::from_value(raw.clone()).map_err(|e| {
            ArchiveError::validation(format!("announcement #{}: {}", index, e))
        })?;
        validate_one(&announcement)
            .map_err(|msg| ArchiveError::validation(format!("announcement #{}: {}", index, msg)))?;
    }
    Ok(announcements.len())
}

fn validate_one(announcement: &Announcement) -> std::result::Result<(), String> {
    if announcement.kind != Announcement::KIND {
        return Err(format!("unexpected type \"{}\"", announcement.kind));
    }

    let data = &announcement.data;
    if !AnnouncementSubject::KINDS.contains(&data.subject.kind.as_str()) {
        return Err(format!(
            "id {}: unexpected subject type \"{}\"",
            data.id, data.subject.kind
        ));
    }

    if let Some(att) = data.attachments.iter().find(|a| a.kind != Attachment::KIND) {
        return Err(format!(
            "id {}: unexpected attachment type \"{}\"",
            data.id, att.kind
        ));
    }
    Ok(())
}
