use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use serde::Serialize;

use crate::hn::error::HnError;
use crate::hn::transport::Transport;
use crate::hn::types::{Item, ItemId, StoryType, User};

pub const MOCK_BASE_URL: &str = "http://hn.mock/v0";

#[derive(Debug, Clone)]
enum Reply {
    Body(Bytes),
    Fail(String),
}

/// In-memory stand-in for the remote API.
///
/// Counts every request per URL and records the peak number of requests in
/// flight at once. Unknown URLs answer `null`, which is what the real API does
/// for ids it does not know.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<HashMap<String, usize>>,
    latency: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    pub fn item_url(id: ItemId) -> String {
        format!("{MOCK_BASE_URL}/item/{id}.json")
    }

    pub fn user_url(id: &str) -> String {
        format!("{MOCK_BASE_URL}/user/{id}.json")
    }

    pub fn story_ids_url(story_type: StoryType) -> String {
        format!("{MOCK_BASE_URL}/{story_type}stories.json")
    }

    pub fn respond_json<T: Serialize>(&self, url: impl Into<String>, body: &T) {
        let body = serde_json::to_vec(body).unwrap_or_default();
        self.replies.lock().insert(url.into(), Reply::Body(body.into()));
    }

    pub fn respond_raw(&self, url: impl Into<String>, body: &'static str) {
        self.replies
            .lock()
            .insert(url.into(), Reply::Body(Bytes::from_static(body.as_bytes())));
    }

    pub fn fail(&self, url: impl Into<String>) {
        let url = url.into();
        self.replies
            .lock()
            .insert(url.clone(), Reply::Fail(format!("connection reset fetching {url}")));
    }

    pub fn add_item(&self, item: Item) {
        self.respond_json(Self::item_url(item.id), &item);
    }

    pub fn add_user(&self, user: User) {
        self.respond_json(Self::user_url(&user.id), &user);
    }

    pub fn set_story_ids(&self, story_type: StoryType, ids: &[ItemId]) {
        self.respond_json(Self::story_ids_url(story_type), &ids);
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().get(url).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<Bytes, HnError> {
        *self.calls.lock().entry(url.to_string()).or_default() += 1;

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let reply = self.replies.lock().get(url).cloned();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Fail(message)) => Err(HnError::Transport(message)),
            None => Ok(Bytes::from_static(b"null")),
        }
    }
}
