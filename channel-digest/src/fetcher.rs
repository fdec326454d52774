use crate::types::{DigestError, FetchConfig, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

/// Thin wrapper over a shared HTTP client. One attempt per request, no retries.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&config.accept_language) {
            headers.insert(ACCEPT_LANGUAGE, value);
        }

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    /// GET `url` and return the body, failing on any non-2xx status.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let start_time = Instant::now();
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(DigestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let limit_bytes = self.config.max_body_mb.saturating_mul(1024 * 1024);
        if let Some(content_length) = response.content_length() {
            if content_length as usize > limit_bytes {
                return Err(DigestError::BodyTooLarge {
                    url: url.to_string(),
                    limit_mb: self.config.max_body_mb,
                });
            }
        }

        let content = response.text().await?;
        if content.len() > limit_bytes {
            return Err(DigestError::BodyTooLarge {
                url: url.to_string(),
                limit_mb: self.config.max_body_mb,
            });
        }

        debug!(
            "Fetched {} ({} bytes in {}ms)",
            url,
            content.len(),
            start_time.elapsed().as_millis()
        );
        Ok(content)
    }
}
