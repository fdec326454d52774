use crate::types::RawEntry;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which of a channel's feed entries make it into the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum FilterPolicy {
    /// Keep every entry.
    All,
    /// Keep the first `count` entries as the feed lists them.
    Latest { count: usize },
    /// Keep entries published within the last `days` days.
    Window { days: u32 },
}

impl Default for FilterPolicy {
    fn default() -> Self {
        FilterPolicy::Latest { count: 5 }
    }
}

/// Applies a [`FilterPolicy`] relative to a fixed `now`. Never reorders.
#[derive(Debug, Clone, Copy)]
pub struct EntryFilter {
    policy: FilterPolicy,
    now: DateTime<Utc>,
}

impl EntryFilter {
    pub fn new(policy: FilterPolicy, now: DateTime<Utc>) -> Self {
        Self { policy, now }
    }

    pub fn apply(&self, entries: Vec<RawEntry>) -> Vec<RawEntry> {
        let before = entries.len();

        let kept: Vec<RawEntry> = match self.policy {
            FilterPolicy::All => entries,
            FilterPolicy::Latest { count } => entries.into_iter().take(count).collect(),
            FilterPolicy::Window { days } => {
                // A window reaching past the representable range keeps everything.
                match Duration::try_days(i64::from(days))
                    .and_then(|window| self.now.checked_sub_signed(window))
                {
                    Some(cutoff) => entries
                        .into_iter()
                        .filter(|entry| entry.published_at > cutoff)
                        .collect(),
                    None => entries,
                }
            }
        };

        debug!("Filter {:?} kept {}/{} entries", self.policy, kept.len(), before);
        kept
    }
}
