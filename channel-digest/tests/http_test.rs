mod common;

use async_trait::async_trait;
use channel_digest::{
    ChannelFeed, ChannelList, ChannelOutcome, ChannelProfile, ChannelResolver, DigestError,
    DigestPipeline, FeedSource, FetchConfig, Fetcher, FilterPolicy, PageResolver, Result,
};
use common::{init_tracing, serve, Routes};
use std::sync::Arc;
use std::time::Duration;

const PROFILE_PAGE: &str = r#"<html><head>
    <meta property="og:title" content="Local Channel">
    <meta property="og:url" content="https://www.youtube.com/channel/UClocal">
    </head></html>"#;

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns:yt="http://www.youtube.com/xml/schemas/2015" xmlns="http://www.w3.org/2005/Atom">
 <id>yt:channel:UClocal</id>
 <title>Local Channel</title>
 <entry>
  <id>yt:video:vid1</id>
  <title>Only upload</title>
  <link rel="alternate" href="https://www.youtube.com/watch?v=vid1"/>
  <published>2024-05-01T10:00:00+00:00</published>
 </entry>
</feed>"#;

fn fetcher(config: FetchConfig) -> Arc<Fetcher> {
    Arc::new(Fetcher::new(config).unwrap())
}

fn local_config() -> FetchConfig {
    FetchConfig {
        timeout_seconds: 5,
        ..FetchConfig::default()
    }
}

/// A profile URL reference is used verbatim when it names the platform domain.
fn local_reference(base: &str, path: &str) -> String {
    format!("{}/youtube.com/{}", base, path)
}

#[tokio::test]
async fn test_profile_page_404_is_unresolved() {
    init_tracing();

    let base = serve(Routes::default()).await;
    let resolver = PageResolver::new(fetcher(local_config()));
    let reference = local_reference(&base, "@gone");

    match resolver.resolve(&reference).await {
        Err(DigestError::Unresolved { reference: r, reason }) => {
            assert_eq!(r, reference);
            assert!(reason.contains("404"), "reason was {reason}");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_profile_page_resolves_over_http() {
    let base = serve(Routes::default().with("/youtube.com/@local", 200, PROFILE_PAGE)).await;
    let resolver = PageResolver::new(fetcher(local_config()));

    let profile = resolver
        .resolve(&local_reference(&base, "@local"))
        .await
        .unwrap();
    assert_eq!(profile.id, "UClocal");
    assert_eq!(profile.title, "Local Channel");
}

#[tokio::test]
async fn test_feed_over_http() {
    let base = serve(Routes::default().with("/feed.xml", 200, FEED)).await;
    let feeds = ChannelFeed::new(fetcher(local_config()));

    let entries = feeds.fetch_entries(&format!("{}/feed.xml", base)).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].video_id.as_deref(), Some("vid1"));

    match feeds.fetch_entries(&format!("{}/missing.xml", base)).await {
        Err(DigestError::HttpStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let big = "x".repeat(1024 * 1024 + 1);
    let base = serve(Routes::default().with("/big", 200, big)).await;

    let limited = fetcher(FetchConfig {
        max_body_mb: 1,
        ..local_config()
    });
    match limited.fetch_text(&format!("{}/big", base)).await {
        Err(DigestError::BodyTooLarge { limit_mb, .. }) => assert_eq!(limit_mb, 1),
        other => panic!("unexpected: {:?}", other.map(|body| body.len())),
    }
}

#[tokio::test]
async fn test_huge_body_limit_does_not_overflow() {
    let base = serve(Routes::default().with("/small", 200, "hello")).await;

    let unlimited = fetcher(FetchConfig {
        max_body_mb: usize::MAX,
        ..local_config()
    });
    assert_eq!(
        unlimited.fetch_text(&format!("{}/small", base)).await.unwrap(),
        "hello"
    );
}

/// Resolves every reference to a channel whose feed lives on the local server.
struct LocalResolver {
    feed_url: String,
}

#[async_trait]
impl ChannelResolver for LocalResolver {
    async fn resolve(&self, reference: &str) -> Result<ChannelProfile> {
        Ok(ChannelProfile {
            id: "UClocal".to_string(),
            title: reference.to_string(),
            profile_url: reference.to_string(),
            feed_url: self.feed_url.clone(),
        })
    }
}

#[tokio::test]
async fn test_feed_404_recorded_as_feed_failure() {
    init_tracing();

    let base = serve(Routes::default()).await;
    let pipeline = DigestPipeline::new(
        Box::new(LocalResolver {
            feed_url: format!("{}/feeds/videos.xml", base),
        }),
        Box::new(ChannelFeed::new(fetcher(local_config()))),
    )
    .with_filter(FilterPolicy::All)
    .with_pacing(Duration::ZERO);

    let report = pipeline.run(&ChannelList::parse("@local\n")).await;

    assert!(report.result.is_empty());
    assert_eq!(report.feed_failures(), 1);
    match &report.outcomes[0] {
        ChannelOutcome::FeedFailed { reason, .. } => assert!(reason.contains("404")),
        other => panic!("unexpected: {other:?}"),
    }
}
