#![allow(dead_code)]

use async_trait::async_trait;
use channel_digest::normalize;
use channel_digest::{ChannelProfile, ChannelResolver, DigestError, FeedSource, RawEntry, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn day(n: i64) -> DateTime<Utc> {
    base_time() + Duration::days(n)
}

pub fn raw_entry(title: &str, video_id: &str, published_at: DateTime<Utc>) -> RawEntry {
    RawEntry {
        title: title.to_string(),
        link: format!("https://www.youtube.com/watch?v={}", video_id),
        published_at,
        video_id: Some(video_id.to_string()),
    }
}

pub fn profile(reference: &str, id: &str, title: &str) -> ChannelProfile {
    ChannelProfile {
        id: id.to_string(),
        title: title.to_string(),
        profile_url: normalize::profile_url(reference),
        feed_url: normalize::feed_url(id),
    }
}

/// Resolver answering from a fixed table; unknown references fail.
#[derive(Default)]
pub struct FakeResolver {
    profiles: HashMap<String, ChannelProfile>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeResolver {
    pub fn with(mut self, reference: &str, id: &str, title: &str) -> Self {
        self.profiles
            .insert(reference.to_string(), profile(reference, id, title));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelResolver for FakeResolver {
    async fn resolve(&self, reference: &str) -> Result<ChannelProfile> {
        self.calls.lock().unwrap().push(reference.to_string());
        self.profiles
            .get(reference)
            .cloned()
            .ok_or_else(|| DigestError::Unresolved {
                reference: reference.to_string(),
                reason: "HTTP 404".to_string(),
            })
    }
}

/// Feed source keyed by channel id; unknown feeds fail.
#[derive(Default)]
pub struct FakeFeeds {
    feeds: HashMap<String, Vec<RawEntry>>,
}

impl FakeFeeds {
    pub fn with(mut self, channel_id: &str, entries: Vec<RawEntry>) -> Self {
        self.feeds.insert(normalize::feed_url(channel_id), entries);
        self
    }
}

#[async_trait]
impl FeedSource for FakeFeeds {
    async fn fetch_entries(&self, feed_url: &str) -> Result<Vec<RawEntry>> {
        self.feeds
            .get(feed_url)
            .cloned()
            .ok_or_else(|| DigestError::Parse(format!("no feed at {}", feed_url)))
    }
}

/// Canned HTTP responses keyed by request path; unknown paths get a 404.
#[derive(Default, Clone)]
pub struct Routes {
    responses: HashMap<String, (u16, String)>,
}

impl Routes {
    pub fn with(mut self, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.responses.insert(path.to_string(), (status, body.into()));
        self
    }
}

/// Serve `routes` on an ephemeral local port and return its base URL.
pub async fn serve(routes: Routes) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let routes = routes.clone();

            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&request);
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = routes
                    .responses
                    .get(&path)
                    .cloned()
                    .unwrap_or((404, "not found".to_string()));

                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}
