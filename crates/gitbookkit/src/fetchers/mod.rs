//! Page fetchers
//!
//! Design: the crawler only needs "give me the body behind this URL". That
//! capability is the [`PageFetcher`] trait, so HTTP can be swapped for an
//! in-memory source in tests or for a custom client in applications.

mod http;

pub use http::HttpFetcher;

use crate::error::CrawlError;
use async_trait::async_trait;

/// A fetched page body with response metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL that was requested
    pub url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value
    pub content_type: Option<String>,
    /// Response body as text
    pub body: String,
}

impl FetchedPage {
    /// Create a successful page with the given body
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code: 200,
            content_type: None,
            body: body.into(),
        }
    }
}

/// Trait for page sources used by the crawler
///
/// Implementations must be usable from several concurrent tasks; each call
/// fetches one URL and returns its body, or an error if the page could not
/// be retrieved.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Identifier for logging
    fn name(&self) -> &'static str;

    /// Fetch one URL
    async fn fetch(&self, url: &str) -> Result<FetchedPage, CrawlError>;
}
