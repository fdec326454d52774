//! Channel list and run settings.

use crate::aggregator::GroupingMode;
use crate::filter::FilterPolicy;
use crate::render::OutputFormat;
use crate::types::{FetchConfig, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One channel line of the list, with the group header in force above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    pub reference: String,
    pub group: Option<String>,
    /// 1-based line number in the source file.
    pub line: usize,
}

/// Parsed channel list, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelList {
    pub channels: Vec<ChannelSpec>,
    /// Group headers in the order they first appear.
    pub groups: Vec<String>,
}

impl ChannelList {
    /// Parse the line-oriented list format.
    ///
    /// Blank lines and `#` comments are skipped, `[Name]` opens (or reopens)
    /// group `Name`, anything else is a channel reference.
    pub fn parse(text: &str) -> Self {
        let mut list = ChannelList::default();
        let mut current_group: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = group_header(line) {
                debug!("Line {}: group [{}]", index + 1, name);
                if !list.groups.iter().any(|g| g == name) {
                    list.groups.push(name.to_string());
                }
                current_group = Some(name.to_string());
                continue;
            }

            list.channels.push(ChannelSpec {
                reference: line.to_string(),
                group: current_group.clone(),
                line: index + 1,
            });
        }

        list
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

fn group_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
}

/// Settings for a digest run, usually read from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    #[serde(default = "default_channels_file")]
    pub channels_file: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub grouping: GroupingMode,
    /// Pause between successive profile fetches.
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
    #[serde(default = "default_page_title")]
    pub page_title: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub filter: FilterPolicy,
    #[serde(default)]
    pub fetch: FetchConfig,
}

fn default_channels_file() -> PathBuf {
    PathBuf::from("channels.txt")
}

fn default_output() -> PathBuf {
    PathBuf::from("index.html")
}

fn default_pacing_ms() -> u64 {
    1000
}

fn default_page_title() -> String {
    "Latest YouTube Videos".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            channels_file: default_channels_file(),
            output: default_output(),
            format: OutputFormat::default(),
            grouping: GroupingMode::default(),
            pacing_ms: default_pacing_ms(),
            page_title: default_page_title(),
            log_level: default_log_level(),
            filter: FilterPolicy::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl DigestConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}
