use crate::aggregator::{AggregatedResult, DigestAggregator, GroupingMode};
use crate::config::{ChannelList, ChannelSpec};
use crate::filter::{EntryFilter, FilterPolicy};
use crate::traits::{ChannelResolver, FeedSource};
use crate::types::{ChannelOutcome, VideoEntry};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of one digest run: the aggregated entries plus what happened to
/// every configured channel.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub result: AggregatedResult,
    pub outcomes: Vec<ChannelOutcome>,
}

impl RunReport {
    pub fn collected(&self) -> usize {
        self.count(|o| o.is_collected())
    }

    pub fn unresolved(&self) -> usize {
        self.count(|o| matches!(o, ChannelOutcome::Unresolved { .. }))
    }

    pub fn feed_failures(&self) -> usize {
        self.count(|o| matches!(o, ChannelOutcome::FeedFailed { .. }))
    }

    pub fn misconfigured(&self) -> usize {
        self.count(|o| matches!(o, ChannelOutcome::Misconfigured { .. }))
    }

    fn count(&self, predicate: impl Fn(&ChannelOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|outcome| predicate(*outcome)).count()
    }
}

/// Sequential driver: resolve, fetch, filter and aggregate every channel in
/// list order. A failing channel only ever contributes nothing.
pub struct DigestPipeline {
    resolver: Box<dyn ChannelResolver>,
    feeds: Box<dyn FeedSource>,
    grouping: GroupingMode,
    filter: FilterPolicy,
    pacing: Duration,
}

impl DigestPipeline {
    pub fn new(resolver: Box<dyn ChannelResolver>, feeds: Box<dyn FeedSource>) -> Self {
        Self {
            resolver,
            feeds,
            grouping: GroupingMode::default(),
            filter: FilterPolicy::default(),
            pacing: Duration::from_secs(1),
        }
    }

    pub fn with_grouping(mut self, grouping: GroupingMode) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_filter(mut self, filter: FilterPolicy) -> Self {
        self.filter = filter;
        self
    }

    /// Pause inserted between successive profile fetches.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub async fn run(&self, channels: &ChannelList) -> RunReport {
        self.run_at(channels, Utc::now()).await
    }

    /// Run with an explicit clock, used for the recency window.
    pub async fn run_at(&self, channels: &ChannelList, now: DateTime<Utc>) -> RunReport {
        info!(
            "Processing {} channels ({:?}, {:?})",
            channels.len(),
            self.grouping,
            self.filter
        );

        let filter = EntryFilter::new(self.filter, now);
        let mut aggregator = DigestAggregator::new(self.grouping);
        let mut outcomes = Vec::with_capacity(channels.len());
        let mut fetched_profile = false;

        for name in &channels.groups {
            aggregator.open_group(name);
        }

        for spec in &channels.channels {
            let group = match self.grouping {
                GroupingMode::Flat => None,
                GroupingMode::Grouped => spec.group.as_deref(),
            };

            if let Err(e) = aggregator.check_group(&spec.reference, spec.line, group) {
                warn!("Skipping channel: {}", e);
                outcomes.push(ChannelOutcome::Misconfigured {
                    reference: spec.reference.clone(),
                    line: spec.line,
                    reason: e.to_string(),
                });
                continue;
            }

            if fetched_profile && !self.pacing.is_zero() {
                debug!("Pausing {:?} before next channel", self.pacing);
                tokio::time::sleep(self.pacing).await;
            }
            fetched_profile = true;

            let (outcome, entries) = self.process_channel(spec, group, &filter).await;
            aggregator.add_channel(entries);
            outcomes.push(outcome);
        }

        let report = RunReport {
            generated_at: now,
            result: aggregator.finish(),
            outcomes,
        };

        info!(
            "Digest complete: {} entries, {} channels collected, {} unresolved, {} feed failures, {} misconfigured",
            report.result.all_entries().len(),
            report.collected(),
            report.unresolved(),
            report.feed_failures(),
            report.misconfigured()
        );
        report
    }

    async fn process_channel(
        &self,
        spec: &ChannelSpec,
        group: Option<&str>,
        filter: &EntryFilter,
    ) -> (ChannelOutcome, Vec<VideoEntry>) {
        let channel = match self.resolver.resolve(&spec.reference).await {
            Ok(channel) => channel,
            Err(e) => {
                warn!("Could not resolve {}: {}", spec.reference, e);
                let outcome = ChannelOutcome::Unresolved {
                    reference: spec.reference.clone(),
                    reason: e.to_string(),
                };
                return (outcome, Vec::new());
            }
        };

        let raw_entries = match self.feeds.fetch_entries(&channel.feed_url).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Feed for {} ({}) failed: {}", spec.reference, channel.feed_url, e);
                let outcome = ChannelOutcome::FeedFailed {
                    reference: spec.reference.clone(),
                    channel,
                    reason: e.to_string(),
                };
                return (outcome, Vec::new());
            }
        };

        let entries: Vec<VideoEntry> = filter
            .apply(raw_entries)
            .into_iter()
            .map(|raw| VideoEntry::from_raw(raw, &channel.title, group))
            .collect();

        info!("{}: {} entries from {}", spec.reference, entries.len(), channel.title);

        let outcome = ChannelOutcome::Collected {
            reference: spec.reference.clone(),
            channel,
            entries: entries.len(),
        };
        (outcome, entries)
    }
}
