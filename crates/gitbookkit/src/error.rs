//! Error types for GitbookKit

use thiserror::Error;

/// Errors that can occur while configuring or running a crawl
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Entry URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// URL could not be parsed
    #[error("Invalid URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Content selector is not a valid CSS selector
    #[error("Invalid content selector: {0}")]
    InvalidSelector(String),

    /// Worker pool must have at least one worker
    #[error("Invalid worker count: max_workers must be at least 1")]
    InvalidWorkerCount,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Sitemap document could not be parsed
    #[error("Sitemap parsing failed: {0}")]
    SitemapError(String),
}

impl CrawlError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CrawlError::Timeout
        } else if err.is_connect() {
            CrawlError::ConnectError(err)
        } else {
            CrawlError::RequestError(err.to_string())
        }
    }

    /// Create an error for a URL that failed to parse
    pub(crate) fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        CrawlError::InvalidUrl {
            url: url.into(),
            source,
        }
    }
}
