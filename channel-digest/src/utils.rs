/// Time helpers shared by the filter and the renderer
pub mod time {
    use chrono::{DateTime, Duration, Timelike, Utc};

    /// Drop any sub-second component.
    pub fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
        dt.with_nanosecond(0).unwrap_or(dt)
    }

    /// Human-readable age of `published` as seen from `now`.
    ///
    /// Buckets on whole elapsed days: under one day gives minutes (below an
    /// hour) or hours, then "Yesterday", "N days ago" up to 6, "N week(s) ago"
    /// up to 29, and the plain date from 30 days on. Timestamps in the future
    /// count as zero elapsed time.
    pub fn relative_time(now: DateTime<Utc>, published: DateTime<Utc>) -> String {
        let elapsed = now.signed_duration_since(published).max(Duration::zero());
        let days = elapsed.num_days();

        match days {
            0 if elapsed < Duration::hours(1) => format!("{} minutes ago", elapsed.num_minutes()),
            0 => format!("{} hours ago", elapsed.num_hours()),
            1 => "Yesterday".to_string(),
            2..=6 => format!("{} days ago", days),
            7..=29 => {
                let weeks = days / 7;
                if weeks > 1 {
                    format!("{} weeks ago", weeks)
                } else {
                    "1 week ago".to_string()
                }
            }
            _ => published.format("%Y-%m-%d").to_string(),
        }
    }
}

/// URL helpers for feed entries
pub mod url {
    use url::Url;

    const ENTRY_ID_PREFIX: &str = "yt:video:";

    /// Video id of a feed entry, from its Atom id or failing that its link.
    pub fn video_id(entry_id: &str, link: &str) -> Option<String> {
        if let Some(id) = entry_id.strip_prefix(ENTRY_ID_PREFIX) {
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }

        let parsed = Url::parse(link).ok()?;
        if let Some((_, v)) = parsed.query_pairs().find(|(key, _)| key == "v") {
            if !v.is_empty() {
                return Some(v.into_owned());
            }
        }

        let mut segments = parsed.path_segments()?;
        match segments.next() {
            Some("shorts") => segments.next().filter(|s| !s.is_empty()).map(str::to_string),
            _ => None,
        }
    }
}
