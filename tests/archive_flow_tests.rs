mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use tempfile::TempDir;

use common::*;
use tcarchive::client::Session;
use tcarchive::config::Credentials;
use tcarchive::errors::ArchiveError;
use tcarchive::models::{AnnouncementPage, Pagination, Post};
use tcarchive::ordering::OrderHypothesis;
use tcarchive::services::{self, announcements};
use tcarchive::storage::ArchiveLayout;

fn credentials() -> Credentials {
    Credentials::new("sam@example.com", "secret")
}

#[tokio::test]
async fn test_login_collects_children() {
    let api = FakeApi::new(vec![
        child(300, 1141, "Robin"),
        child(120, 1141, "Ada"),
        child(300, 1141, "Robin"),
    ]);
    let session = Session::login(Arc::new(api), &credentials()).await.unwrap();

    assert_eq!(session.school_id(), SCHOOL_ID);
    assert_eq!(session.child_ids(), vec![120, 300]);
    assert_eq!(session.classroom_ids(), vec![1141]);
    assert_eq!(session.token(), TOKEN);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let api = FakeApi::new(vec![child(1, 1, "A")]);
    let result = Session::login(Arc::new(api), &Credentials::new("sam", "nope")).await;
    assert!(matches!(result, Err(ArchiveError::Auth(_))));
}

#[tokio::test]
async fn test_login_rejects_non_child_subject() {
    let mut staff = child(9, 1, "Staff");
    staff.kind = "Teacher".to_string();
    let api = FakeApi::new(vec![child(1, 1, "A"), staff]);
    let result = Session::login(Arc::new(api), &credentials()).await;
    match result {
        Err(ArchiveError::UnexpectedResponse(msg)) => assert!(msg.contains("Teacher")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("non-child subject accepted"),
    }
}

#[tokio::test]
async fn test_archive_posts_writes_each_child_in_server_order() {
    let tmp = TempDir::new().unwrap();
    let layout = ArchiveLayout::new(tmp.path());

    let robin = listing(1000, 65);
    let ada = listing(5000, 30);
    let api = Arc::new(
        FakeApi::new(vec![child(300, 1141, "Robin"), child(120, 1142, "Ada")])
            .with_posts(300, robin.clone())
            .with_posts(120, ada.clone()),
    );
    let session = Session::login(api.clone(), &credentials()).await.unwrap();

    let archived = services::archive_posts(&session, &layout).await.unwrap();

    assert_eq!(archived.len(), 2);
    assert_eq!(archived[0].child_id, 120);
    assert_eq!(archived[0].posts, 30);
    assert_eq!(archived[1].posts, 65);
    assert_eq!(archived[1].photos, robin.iter().filter(|p| p.has_photo()).count());

    // 30 posts: pages 1 and 2 (empty), listed twice; 65 posts: pages 1..=3, twice
    assert_eq!(api.page_requests.load(Ordering::SeqCst), 2 * 2 + 3 * 2);

    let on_disk: Vec<Post> = layout.read_posts(&layout.posts_file(300)).unwrap();
    assert_eq!(on_disk, robin);
    assert_eq!(layout.read_posts(&layout.posts_file(120)).unwrap(), ada);

    let report = &archived[1].order;
    assert!(report.is_consistent_with(OrderHypothesis::ConcatenatedKey));
    assert!(!report.is_consistent_with(OrderHypothesis::Id));
}

#[tokio::test]
async fn test_archive_posts_keeps_misordered_listing_as_served() {
    let tmp = TempDir::new().unwrap();
    let layout = ArchiveLayout::new(tmp.path());

    // a backdated post the server lists by created_at
    let served = vec![
        photo_post(12, "2022-03-01", "2022-04-02T09:00:00.000-07:00"),
        Post::new(11, "2022-04-01", "2022-04-01T09:00:00.000-07:00"),
        Post::new(10, "2022-03-31", "2022-03-31T09:00:00.000-07:00"),
    ];
    let api = Arc::new(FakeApi::new(vec![child(4, 1, "Kit")]).with_posts(4, served.clone()));
    let session = Session::login(api, &credentials()).await.unwrap();

    let archived = services::archive_posts(&session, &layout).await.unwrap();

    let report = &archived[0].order;
    assert!(!report.is_consistent_with(OrderHypothesis::ConcatenatedKey));
    assert!(report.is_consistent_with(OrderHypothesis::CreatedAt));
    assert_eq!(
        std::fs::read_to_string(layout.posts_file(4)).unwrap(),
        serde_json::to_string_pretty(&served).unwrap()
    );
}

#[tokio::test]
async fn test_archive_posts_child_without_posts() {
    let tmp = TempDir::new().unwrap();
    let layout = ArchiveLayout::new(tmp.path());
    let api = Arc::new(FakeApi::new(vec![child(7, 1, "New")]));
    let session = Session::login(api, &credentials()).await.unwrap();

    let archived = services::archive_posts(&session, &layout).await.unwrap();
    assert_eq!(archived[0].posts, 0);
    assert_eq!(std::fs::read_to_string(layout.posts_file(7)).unwrap(), "[]");
}

#[tokio::test]
async fn test_announcements_follow_cursor() {
    let tmp = TempDir::new().unwrap();
    let layout = ArchiveLayout::new(tmp.path());

    let mut api = FakeApi::new(vec![child(1, 1, "A")]);
    api.announcements = vec![
        AnnouncementPage {
            data: vec![announcement(1), announcement(2)],
            pagination: Pagination {
                next: Some("1".to_string()),
            },
        },
        AnnouncementPage {
            data: vec![announcement(3)],
            pagination: Pagination {
                next: Some("2".to_string()),
            },
        },
    ];
    let session = Session::login(Arc::new(api), &credentials()).await.unwrap();

    let count = announcements::archive_announcements(&session, &layout)
        .await
        .unwrap();
    assert_eq!(count, 3);

    let saved: Vec<serde_json::Value> =
        tcarchive::storage::read_json(&layout.announcements_file()).unwrap();
    assert_eq!(saved.len(), 3);
    assert_eq!(announcements::validate(&saved).unwrap(), 3);
}
