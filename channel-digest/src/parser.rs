use crate::types::{DigestError, ParsedFeed, RawEntry, Result};
use crate::utils::{time, url};
use feed_rs::parser;
use std::collections::HashSet;
use tracing::debug;

/// Turns a channel's Atom feed into [`RawEntry`] records, in document order.
#[derive(Debug, Default)]
pub struct FeedParser;

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_feed(&self, content: &str) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| DigestError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);

        let mut seen_ids = HashSet::new();
        let mut seen_links = HashSet::new();
        let mut entries = Vec::new();

        for entry in feed.entries {
            let Some(parsed) = Self::parse_entry(entry) else {
                continue;
            };

            if let Some(video_id) = &parsed.video_id {
                if !seen_ids.insert(video_id.clone()) {
                    debug!("Skipping duplicate video {}", video_id);
                    continue;
                }
            }
            if !seen_links.insert(parsed.link.clone()) {
                debug!("Skipping duplicate link {}", parsed.link);
                continue;
            }

            entries.push(parsed);
        }

        debug!("Parsed feed with {} entries", entries.len());
        Ok(ParsedFeed { title, entries })
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> Option<RawEntry> {
        let link = match entry.links.first() {
            Some(link) => link.href.clone(),
            None => {
                debug!("Skipping entry {} without a link", entry.id);
                return None;
            }
        };

        let published_at = match entry.published.or(entry.updated) {
            Some(dt) => time::truncate_to_seconds(dt),
            None => {
                debug!("Skipping entry {} without a timestamp", link);
                return None;
            }
        };

        let title = entry
            .title
            .map(|t| t.content)
            .unwrap_or_else(|| "Untitled".to_string());

        let video_id = url::video_id(&entry.id, &link);

        Some(RawEntry {
            title,
            link,
            published_at,
            video_id,
        })
    }
}
