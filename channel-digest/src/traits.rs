use crate::types::{ChannelProfile, RawEntry, Result};
use async_trait::async_trait;

/// Maps a human-facing channel reference to its stable identity.
///
/// Today this is backed by scraping profile page metadata (see
/// [`crate::resolver::PageResolver`]); any other lookup can be slotted in
/// without touching the rest of the pipeline.
#[async_trait]
pub trait ChannelResolver: Send + Sync {
    /// Resolve a raw reference (`name`, `@handle` or profile URL).
    async fn resolve(&self, reference: &str) -> Result<ChannelProfile>;
}

/// Source of the entries listed in a channel's syndication feed.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse the feed, in the order the feed lists its entries.
    async fn fetch_entries(&self, feed_url: &str) -> Result<Vec<RawEntry>>;
}
