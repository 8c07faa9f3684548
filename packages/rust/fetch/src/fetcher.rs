//! HTTP fetching for feed and URL-list sources.
//!
//! Two clients are kept: one for feeds, which carries the configured
//! `User-Agent` and timeout, and a default one for article pages.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, instrument, warn};
use url::Url;

use extposts_shared::{ExtPostsError, FeedEntry, FetchConfig, Result};

use crate::feed::{FeedFailure, parse_feed};
use crate::page::PageContent;

/// HTTP client pair shared by every source in a run.
#[derive(Debug, Clone)]
pub struct Fetcher {
    feed_client: Client,
    page_client: Client,
    accept: String,
}

impl Fetcher {
    /// Build the clients from the `[fetch]` config section.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let feed_client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.feed_timeout_secs))
            .build()
            .map_err(|e| ExtPostsError::Network(format!("failed to build HTTP client: {e}")))?;

        let page_client = Client::builder()
            .build()
            .map_err(|e| ExtPostsError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            feed_client,
            page_client,
            accept: config.accept.clone(),
        })
    }

    /// Fetch and parse a feed. Every failure is soft and reported as a
    /// [`FeedFailure`].
    #[instrument(skip(self))]
    pub async fn fetch_feed(&self, url: &str) -> std::result::Result<Vec<FeedEntry>, FeedFailure> {
        let parsed = Url::parse(url).map_err(|e| FeedFailure::Network(format!("{url}: {e}")))?;

        let response = self
            .feed_client
            .get(parsed)
            .header(ACCEPT, self.accept.as_str())
            .send()
            .await
            .map_err(|e| FeedFailure::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedFailure::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedFailure::Network(format!("{url}: body read failed: {e}")))?;

        debug!(bytes = body.len(), "feed body received");

        parse_feed(&body, url)
    }

    /// Fetch an article page and extract its metadata.
    ///
    /// Failures here are fatal to the run. A non-success status is only
    /// logged; whatever body came back is still parsed.
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, url: &str) -> Result<PageContent> {
        let parsed =
            Url::parse(url).map_err(|e| ExtPostsError::config(format!("invalid post URL {url}: {e}")))?;

        let response = self
            .page_client
            .get(parsed)
            .send()
            .await
            .map_err(|e| ExtPostsError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "article page returned non-success status");
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExtPostsError::Network(format!("{url}: body read failed: {e}")))?;

        Ok(PageContent::parse(&body))
    }
}
