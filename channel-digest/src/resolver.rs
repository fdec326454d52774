//! Channel resolution by reading profile page metadata.
//!
//! The stable channel id is not derivable from a handle; it only appears in
//! the profile page markup. This is the most fragile part of the pipeline, so
//! all of the page-structure knowledge lives in [`parse_profile_page`].

use crate::fetcher::Fetcher;
use crate::normalize;
use crate::traits::ChannelResolver;
use crate::types::{ChannelProfile, DigestError, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, info};

const CHANNEL_ID_MARKER: &str = "\"channelId\":\"";

/// Resolves channels by fetching their profile page over HTTP.
pub struct PageResolver {
    fetcher: Arc<Fetcher>,
}

impl PageResolver {
    pub fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl ChannelResolver for PageResolver {
    async fn resolve(&self, reference: &str) -> Result<ChannelProfile> {
        let profile_url = normalize::profile_url(reference);
        debug!("Resolving {} via {}", reference, profile_url);

        let page = self
            .fetcher
            .fetch_text(&profile_url)
            .await
            .map_err(|e| DigestError::Unresolved {
                reference: reference.to_string(),
                reason: e.to_string(),
            })?;

        let profile = parse_profile_page(&page, reference, &profile_url)?;
        info!("Resolved {} to {} ({})", reference, profile.id, profile.title);
        Ok(profile)
    }
}

/// Extract a [`ChannelProfile`] from profile page markup.
///
/// The id comes from the first of: the `og:url` meta tag, the canonical link,
/// an embedded `"channelId":"..."` script value. The first two only count when
/// they contain a `/channel/<id>` segment. The title falls back to `reference`
/// when the page carries none.
pub fn parse_profile_page(html: &str, reference: &str, profile_url: &str) -> Result<ChannelProfile> {
    let document = Html::parse_document(html);

    let id = first_attr(&document, r#"meta[property="og:url"]"#, "content")?
        .and_then(|url| normalize::channel_id_from_url(&url))
        .or(first_attr(&document, r#"link[rel="canonical"]"#, "href")?
            .and_then(|url| normalize::channel_id_from_url(&url)))
        .or(script_channel_id(&document)?)
        .ok_or_else(|| DigestError::Unresolved {
            reference: reference.to_string(),
            reason: "no channel identifier in page metadata".to_string(),
        })?;

    let title = first_attr(&document, r#"meta[property="og:title"]"#, "content")?
        .or(first_attr(&document, r#"meta[name="title"]"#, "content")?)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| reference.trim().to_string());

    Ok(ChannelProfile {
        feed_url: normalize::feed_url(&id),
        id,
        title,
        profile_url: profile_url.to_string(),
    })
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DigestError::Parse(format!("bad selector {}: {:?}", css, e)))
}

fn first_attr(document: &Html, css: &str, attr: &str) -> Result<Option<String>> {
    let selector = selector(css)?;
    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .map(str::to_string)
        .next())
}

fn script_channel_id(document: &Html) -> Result<Option<String>> {
    let selector = selector("script")?;

    for script in document.select(&selector) {
        let text: String = script.text().collect();
        if let Some(start) = text.find(CHANNEL_ID_MARKER) {
            let rest = &text[start + CHANNEL_ID_MARKER.len()..];
            if let Some(end) = rest.find('"') {
                if end > 0 {
                    return Ok(Some(rest[..end].to_string()));
                }
            }
        }
    }

    Ok(None)
}
