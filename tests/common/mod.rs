#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use tcarchive::client::{ClassroomApi, Fetched, Fetcher};
use tcarchive::config::Credentials;
use tcarchive::errors::{ArchiveError, Result};
use tcarchive::models::{AnnouncementPage, Pagination, Post, Subject, UserInfo};
use tcarchive::services::POSTS_PER_PAGE;

pub const TOKEN: &str = "token-abc";
pub const SCHOOL_ID: u64 = 87;

pub fn user_info() -> UserInfo {
    UserInfo {
        id: 4242,
        school_id: SCHOOL_ID,
        first_name: "Sam".to_string(),
        last_name: "Parent".to_string(),
        email: "sam@example.com".to_string(),
        api_token: TOKEN.to_string(),
    }
}

pub fn child(id: u64, classroom_id: u64, name: &str) -> Subject {
    Subject {
        id,
        school_id: SCHOOL_ID,
        classroom_id,
        name: name.to_string(),
        school_name: "Lincoln Montessori".to_string(),
        kind: "Child".to_string(),
    }
}

pub fn photo_post(id: u64, date: &str, created_at: &str) -> Post {
    let mut post = Post::new(id, date, created_at);
    post.photo_url = Some(format!("https://cdn.example.com/{}/photo.jpg", id));
    post.original_photo_url = Some(format!("https://cdn.example.com/{}/original.jpg", id));
    post
}

/// `count` posts, newest first by `date ++ created_at`
pub fn listing(first_id: u64, count: usize) -> Vec<Post> {
    (0..count)
        .map(|i| {
            let day = 28 - (i / 24) as u32 % 28;
            let hour = 23 - (i % 24) as u32;
            let date = format!("2022-03-{:02}", day);
            let created_at = format!("{}T{:02}:00:00.000-07:00", date, hour);
            if i % 3 == 0 {
                Post::new(first_id + i as u64, date, created_at)
            } else {
                photo_post(first_id + i as u64, &date, &created_at)
            }
        })
        .collect()
}

/// In-memory Transparent Classroom
pub struct FakeApi {
    pub password: String,
    pub subjects: Vec<Subject>,
    pub posts: HashMap<u64, Vec<Post>>,
    pub announcements: Vec<AnnouncementPage>,
    pub page_requests: AtomicUsize,
}

impl FakeApi {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self {
            password: "secret".to_string(),
            subjects,
            posts: HashMap::new(),
            announcements: Vec::new(),
            page_requests: AtomicUsize::new(0),
        }
    }

    pub fn with_posts(mut self, child_id: u64, posts: Vec<Post>) -> Self {
        self.posts.insert(child_id, posts);
        self
    }

    fn check_token(&self, token: &str) -> Result<()> {
        if token == TOKEN {
            Ok(())
        } else {
            Err(ArchiveError::auth("bad token"))
        }
    }
}

#[async_trait]
impl ClassroomApi for FakeApi {
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserInfo> {
        if credentials.password == self.password {
            Ok(user_info())
        } else {
            Err(ArchiveError::auth("server rejected credentials (401)"))
        }
    }

    async fn my_subjects(&self, token: &str, school_id: u64) -> Result<Vec<Subject>> {
        self.check_token(token)?;
        assert_eq!(school_id, SCHOOL_ID);
        Ok(self.subjects.clone())
    }

    async fn child_posts_page(
        &self,
        token: &str,
        _school_id: u64,
        child_id: u64,
        page: u32,
    ) -> Result<Vec<Post>> {
        self.check_token(token)?;
        self.page_requests.fetch_add(1, Ordering::SeqCst);
        let all = self.posts.get(&child_id).cloned().unwrap_or_default();
        Ok(all
            .into_iter()
            .skip((page as usize - 1) * POSTS_PER_PAGE)
            .take(POSTS_PER_PAGE)
            .collect())
    }

    async fn announcements_page(
        &self,
        token: &str,
        _school_id: u64,
        cursor: Option<&str>,
    ) -> Result<AnnouncementPage> {
        self.check_token(token)?;
        let index = match cursor {
            None => 0,
            Some(c) => c.parse::<usize>().expect("numeric cursor in fake"),
        };
        Ok(self.announcements.get(index).cloned().unwrap_or(AnnouncementPage {
            data: Vec::new(),
            pagination: Pagination { next: None },
        }))
    }
}

pub fn announcement(id: u64) -> Value {
    json!({
        "type": "Announcement",
        "data": {
            "id": id,
            "createdAt": "2022-03-31T08:23:34.075-07:00",
            "title": format!("Notice {}", id),
            "body": "<p>Hello</p>",
            "author": {"id": 5, "name": "Front Office"},
            "subject": {"id": SCHOOL_ID, "type": "School", "name": "Lincoln Montessori"},
            "attachments": []
        }
    })
}

/// Serves fixed bodies; unknown URLs fail
pub struct FakeFetcher {
    pub responses: Mutex<HashMap<String, (String, Vec<u8>)>>,
    pub requests: Mutex<Vec<String>>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn serve(&self, url: &str, content_type: &str, body: &[u8]) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), (content_type.to_string(), body.to_vec()));
    }

    pub fn serve_jpegs_for(&self, posts: &[Post]) {
        for post in posts {
            for url in [&post.photo_url, &post.original_photo_url].into_iter().flatten() {
                self.serve(url, "image/jpeg", format!("jpeg:{}", url).as_bytes());
            }
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Fetched> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.requests.lock().unwrap().push(url.to_string());

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let response = self.responses.lock().unwrap().get(url).cloned();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match response {
            Some((content_type, bytes)) => Ok(Fetched {
                content_type: Some(content_type),
                bytes,
            }),
            None => Err(ArchiveError::http(format!("GET {} failed: 404", url))),
        }
    }
}
