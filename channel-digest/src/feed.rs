use crate::fetcher::Fetcher;
use crate::parser::FeedParser;
use crate::traits::FeedSource;
use crate::types::{RawEntry, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// [`FeedSource`] that downloads the channel feed and parses it.
pub struct ChannelFeed {
    fetcher: Arc<Fetcher>,
    parser: FeedParser,
}

impl ChannelFeed {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self {
            fetcher,
            parser: FeedParser::new(),
        }
    }
}

#[async_trait]
impl FeedSource for ChannelFeed {
    async fn fetch_entries(&self, feed_url: &str) -> Result<Vec<RawEntry>> {
        let content = self.fetcher.fetch_text(feed_url).await?;
        let parsed = self.parser.parse_feed(&content)?;

        info!(
            "Pulled {} entries from {} ({})",
            parsed.entries.len(),
            parsed.title.as_deref().unwrap_or("untitled feed"),
            feed_url
        );
        Ok(parsed.entries)
    }
}
