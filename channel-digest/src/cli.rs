use crate::aggregator::GroupingMode;
use crate::config::DigestConfig;
use crate::filter::FilterPolicy;
use crate::render::OutputFormat;
use crate::types::Result;
use clap::Parser;
use std::path::PathBuf;

/// Build a static page of the latest videos from a list of YouTube channels.
#[derive(Debug, Default, Parser)]
#[command(name = "channel-digest", version, about)]
pub struct Args {
    /// TOML settings file; command-line flags take precedence over it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Channel list (one handle, name or URL per line, `[Group]` headers)
    #[arg(long)]
    pub channels: Option<PathBuf>,

    /// Where to write the rendered page
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Group channels under their `[Group]` headers
    #[arg(long, conflicts_with = "flat")]
    pub grouped: bool,

    /// Ignore `[Group]` headers and render a single list
    #[arg(long)]
    pub flat: bool,

    /// Keep the first N entries of each feed
    #[arg(long, value_name = "N", conflicts_with_all = ["window_days", "all"])]
    pub latest: Option<usize>,

    /// Keep entries published within the last D days
    #[arg(long, value_name = "D", conflicts_with = "all")]
    pub window_days: Option<u32>,

    /// Keep every feed entry
    #[arg(long)]
    pub all: bool,

    /// Pause between channels, in milliseconds
    #[arg(long)]
    pub pacing_ms: Option<u64>,

    /// Per-request timeout, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Load the settings file (or defaults) and apply flag overrides.
    pub fn resolve_config(&self) -> Result<DigestConfig> {
        let mut config = match &self.config {
            Some(path) => DigestConfig::load(path)?,
            None => DigestConfig::default(),
        };

        if let Some(channels) = &self.channels {
            config.channels_file = channels.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.grouped {
            config.grouping = GroupingMode::Grouped;
        } else if self.flat {
            config.grouping = GroupingMode::Flat;
        }
        if let Some(count) = self.latest {
            config.filter = FilterPolicy::Latest { count };
        } else if let Some(days) = self.window_days {
            config.filter = FilterPolicy::Window { days };
        } else if self.all {
            config.filter = FilterPolicy::All;
        }
        if let Some(pacing_ms) = self.pacing_ms {
            config.pacing_ms = pacing_ms;
        }
        if let Some(timeout) = self.timeout {
            config.fetch.timeout_seconds = timeout;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }

        Ok(config)
    }
}
