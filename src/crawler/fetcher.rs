//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - Gating responses on their Content-Type
//! - Optionally capping how many fetches run at once
//!
//! Redirects are followed by the client's default policy. Status codes are not
//! interpreted: any delivered HTML body is crawlable.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::WebmapError;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

/// Connect timeout never exceeds this, even with a long request timeout
const MAX_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Result of a successful request
#[derive(Debug)]
pub enum FetchResult {
    /// The response is HTML (or did not say what it is)
    Html {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Page is not HTML (Content-Type mismatch)
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use webmap::config::Config;
/// use webmap::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.crawler, &config.user_agent).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    let timeout = crawler.request_timeout_secs;

    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(timeout))
        .connect_timeout(Duration::from_secs(timeout.min(MAX_CONNECT_TIMEOUT_SECS)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true if a Content-Type header value allows the body to be parsed
///
/// A missing or blank header is accepted; servers that do not label their
/// pages are still crawled.
pub fn is_html_content_type(content_type: Option<&str>) -> bool {
    match content_type.map(str::trim) {
        None | Some("") => true,
        Some(value) => value.to_ascii_lowercase().starts_with("text/html"),
    }
}

/// HTTP collaborator used by the crawler
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    limiter: Option<Arc<Semaphore>>,
}

impl Fetcher {
    /// Builds a fetcher from configuration
    pub fn new(crawler: &CrawlerConfig, user_agent: &UserAgentConfig) -> Result<Self, WebmapError> {
        let client = build_http_client(crawler, user_agent)?;
        Ok(Self::from_client(client, crawler.max_concurrent_fetches))
    }

    /// Wraps an existing client
    ///
    /// `max_concurrent` caps simultaneous requests; `None` leaves them unbounded.
    pub fn from_client(client: Client, max_concurrent: Option<usize>) -> Self {
        Self {
            client,
            limiter: max_concurrent.map(|permits| Arc::new(Semaphore::new(permits))),
        }
    }

    /// Returns the number of fetch slots currently free, if a cap is configured
    pub fn available_permits(&self) -> Option<usize> {
        self.limiter.as_ref().map(|s| s.available_permits())
    }

    /// Fetches a URL
    ///
    /// The concurrency permit, if any, is held only for the request and the body
    /// read, so a page waiting on its children never holds a slot.
    ///
    /// # Returns
    ///
    /// * `Ok(FetchResult)` - A response was received
    /// * `Err(WebmapError::Fetch)` - Transport failure or body read failure
    pub async fn fetch(&self, url: &Url) -> Result<FetchResult, WebmapError> {
        let _permit = match &self.limiter {
            Some(limiter) => limiter.acquire().await.ok(),
            None => None,
        };

        let fetch_error = |source| WebmapError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(fetch_error)?;

        let status_code = response.status().as_u16();
        let final_url = response.url().clone();

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

        if !is_html_content_type(content_type.as_deref()) {
            return Ok(FetchResult::ContentMismatch {
                content_type: content_type.unwrap_or_default(),
            });
        }

        let body = response.text().await.map_err(fetch_error)?;

        Ok(FetchResult::Html {
            final_url,
            status_code,
            body,
        })
    }
}
