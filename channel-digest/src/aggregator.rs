use crate::types::{DigestError, Result, VideoEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMode {
    /// One implicit group holding every channel.
    #[default]
    Flat,
    /// Channels belong to the `[Group]` header above them.
    Grouped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSection {
    pub name: String,
    pub entries: Vec<VideoEntry>,
}

/// Aggregated entries ready for rendering. Every sequence is newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AggregatedResult {
    Flat {
        entries: Vec<VideoEntry>,
    },
    Grouped {
        groups: Vec<GroupSection>,
        all: Vec<VideoEntry>,
    },
}

impl AggregatedResult {
    /// Every entry across all groups.
    pub fn all_entries(&self) -> &[VideoEntry] {
        match self {
            AggregatedResult::Flat { entries } => entries,
            AggregatedResult::Grouped { all, .. } => all,
        }
    }

    /// Groups in the order they first appeared; empty in flat mode.
    pub fn groups(&self) -> &[GroupSection] {
        match self {
            AggregatedResult::Flat { .. } => &[],
            AggregatedResult::Grouped { groups, .. } => groups,
        }
    }

    pub fn group(&self, name: &str) -> Option<&GroupSection> {
        self.groups().iter().find(|g| g.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.all_entries().is_empty()
    }
}

/// Accumulates per-channel entries, then sorts everything once in [`finish`].
///
/// [`finish`]: DigestAggregator::finish
#[derive(Debug)]
pub struct DigestAggregator {
    mode: GroupingMode,
    groups: Vec<GroupSection>,
    all: Vec<VideoEntry>,
}

impl DigestAggregator {
    pub fn new(mode: GroupingMode) -> Self {
        Self {
            mode,
            groups: Vec::new(),
            all: Vec::new(),
        }
    }

    /// Fails when a grouped digest receives a channel with no group.
    pub fn check_group(&self, reference: &str, line: usize, group: Option<&str>) -> Result<()> {
        match (self.mode, group) {
            (GroupingMode::Grouped, None) => Err(DigestError::MissingGroup {
                reference: reference.to_string(),
                line,
            }),
            _ => Ok(()),
        }
    }

    /// Add one channel's entries. They must already carry their channel title
    /// and (in grouped mode) their group label.
    pub fn add_channel(&mut self, entries: Vec<VideoEntry>) {
        debug!("Aggregating {} entries", entries.len());

        if self.mode == GroupingMode::Grouped {
            for entry in &entries {
                let Some(name) = entry.group.as_deref() else {
                    continue;
                };
                self.section_mut(name).entries.push(entry.clone());
            }
        }

        self.all.extend(entries);
    }

    /// Register a group even if none of its channels contribute entries.
    pub fn open_group(&mut self, name: &str) {
        if self.mode == GroupingMode::Grouped {
            self.section_mut(name);
        }
    }

    pub fn finish(mut self) -> AggregatedResult {
        sort_newest_first(&mut self.all);

        match self.mode {
            GroupingMode::Flat => AggregatedResult::Flat { entries: self.all },
            GroupingMode::Grouped => {
                for section in &mut self.groups {
                    sort_newest_first(&mut section.entries);
                }
                AggregatedResult::Grouped {
                    groups: self.groups,
                    all: self.all,
                }
            }
        }
    }

    fn section_mut(&mut self, name: &str) -> &mut GroupSection {
        let index = match self.groups.iter().position(|g| g.name == name) {
            Some(index) => index,
            None => {
                self.groups.push(GroupSection {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }
}

/// Stable, so equal timestamps keep their encounter order.
pub fn sort_newest_first(entries: &mut [VideoEntry]) {
    entries.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}
