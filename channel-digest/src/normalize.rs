//! Channel references and the fixed YouTube URL templates.
//!
//! A configured reference is one of a bare handle name (`veritasium`), a handle
//! with its sigil (`@veritasium`) or a full profile URL. Only the last form is
//! passed through untouched; no further validation happens here, a malformed
//! reference simply fails later when its profile page is fetched.

/// Base host every profile URL is built from.
pub const BASE_HOST: &str = "https://www.youtube.com/";

/// Domain substrings that mark a reference as an already complete URL.
pub const PLATFORM_DOMAINS: [&str; 2] = ["youtube.com", "youtu.be"];

pub const HANDLE_SIGIL: char = '@';

/// Path segment that carries the stable channel identifier.
pub const CHANNEL_SEGMENT: &str = "/channel/";

/// Turn a raw reference into the profile URL the resolver fetches.
pub fn profile_url(reference: &str) -> String {
    let reference = reference.trim();

    if is_platform_url(reference) {
        reference.to_string()
    } else if reference.starts_with(HANDLE_SIGIL) {
        format!("{}{}", BASE_HOST, reference)
    } else {
        format!("{}{}{}", BASE_HOST, HANDLE_SIGIL, reference)
    }
}

pub fn is_platform_url(reference: &str) -> bool {
    let lowered = reference.to_ascii_lowercase();
    PLATFORM_DOMAINS.iter().any(|domain| lowered.contains(domain))
}

pub fn feed_url(channel_id: &str) -> String {
    format!("https://www.youtube.com/feeds/videos.xml?channel_id={}", channel_id)
}

/// Medium quality thumbnail for a video.
pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{}/mqdefault.jpg", video_id)
}

/// Pull the identifier out of a URL containing a `/channel/<id>` segment.
pub fn channel_id_from_url(url: &str) -> Option<String> {
    let start = url.find(CHANNEL_SEGMENT)? + CHANNEL_SEGMENT.len();
    let id: String = url[start..]
        .chars()
        .take_while(|c| !matches!(c, '/' | '?' | '#' | '"' | '&'))
        .collect();

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
