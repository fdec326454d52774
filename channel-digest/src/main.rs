use anyhow::Context;
use channel_digest::{
    render, Args, ChannelFeed, ChannelList, DigestPipeline, Fetcher, PageResolver,
};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.resolve_config().context("Failed to load settings")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting channel digest");

    let channels = ChannelList::load(&config.channels_file).with_context(|| {
        format!("Failed to read channel list {}", config.channels_file.display())
    })?;
    info!(
        "Loaded {} channels in {} groups from {}",
        channels.len(),
        channels.groups.len(),
        config.channels_file.display()
    );

    let fetcher = Arc::new(Fetcher::new(config.fetch.clone()).context("Failed to build HTTP client")?);
    let pipeline = DigestPipeline::new(
        Box::new(PageResolver::new(fetcher.clone())),
        Box::new(ChannelFeed::new(fetcher)),
    )
    .with_grouping(config.grouping)
    .with_filter(config.filter)
    .with_pacing(Duration::from_millis(config.pacing_ms));

    let report = pipeline.run(&channels).await;
    if report.result.is_empty() {
        error!("No entries collected; writing an empty page");
    }

    let page = render::render(&report, config.format, &config.page_title)?;
    tokio::fs::write(&config.output, page)
        .await
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    info!(
        "Wrote {} entries to {}",
        report.result.all_entries().len(),
        config.output.display()
    );
    Ok(())
}
