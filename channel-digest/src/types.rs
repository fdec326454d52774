use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical identity of a channel, as read from its profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelProfile {
    pub id: String,
    pub title: String,
    pub profile_url: String,
    pub feed_url: String,
}

#[derive(Debug, Default)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<RawEntry>,
}

/// One feed item before it is attributed to a channel and group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub title: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    pub title: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
    pub channel_title: String,
    pub thumbnail_url: Option<String>,
    pub group: Option<String>,
}

impl VideoEntry {
    pub fn from_raw(raw: RawEntry, channel_title: &str, group: Option<&str>) -> Self {
        let thumbnail_url = raw.video_id.as_deref().map(crate::normalize::thumbnail_url);

        Self {
            title: raw.title,
            link: raw.link,
            published_at: raw.published_at,
            channel_title: channel_title.to_string(),
            thumbnail_url,
            group: group.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub accept_language: String,
    pub max_redirects: usize,
    pub max_body_mb: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) channel-digest/0.1".to_string(),
            timeout_seconds: 30,
            accept_language: "en-US,en;q=0.9".to_string(),
            max_redirects: 5,
            max_body_mb: 10,
        }
    }
}

/// What happened to one configured channel during a run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ChannelOutcome {
    Collected {
        reference: String,
        channel: ChannelProfile,
        entries: usize,
    },
    Unresolved {
        reference: String,
        reason: String,
    },
    FeedFailed {
        reference: String,
        channel: ChannelProfile,
        reason: String,
    },
    Misconfigured {
        reference: String,
        line: usize,
        reason: String,
    },
}

impl ChannelOutcome {
    pub fn reference(&self) -> &str {
        match self {
            ChannelOutcome::Collected { reference, .. }
            | ChannelOutcome::Unresolved { reference, .. }
            | ChannelOutcome::FeedFailed { reference, .. }
            | ChannelOutcome::Misconfigured { reference, .. } => reference,
        }
    }

    pub fn is_collected(&self) -> bool {
        matches!(self, ChannelOutcome::Collected { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Response from {url} exceeds {limit_mb}MB")]
    BodyTooLarge { url: String, limit_mb: usize },

    #[error("Could not resolve channel {reference}: {reason}")]
    Unresolved { reference: String, reason: String },

    #[error("Channel {reference} on line {line} has no preceding [group] header")]
    MissingGroup { reference: String, line: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DigestError>;
