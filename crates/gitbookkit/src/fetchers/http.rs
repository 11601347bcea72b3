//! HTTP page fetcher
//!
//! Fetches pages with a single shared reqwest client. Non-success statuses
//! are returned as [`CrawlError::HttpStatus`], never as page bodies.

use crate::config::FetchOptions;
use crate::error::CrawlError;
use crate::fetchers::{FetchedPage, PageFetcher};
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;
use tracing::debug;

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Accept header sent with every request (pages and sitemap)
const ACCEPT_VALUE: &str = "text/html, application/xhtml+xml, application/xml;q=0.9, */*;q=0.8";

/// HTTP fetcher backed by reqwest
///
/// The client is built once and reused by every concurrent page task.
/// A response outside the 2xx range is returned as
/// [`CrawlError::HttpStatus`] and its body is never handed to extraction,
/// so error pages do not show up as crawled documents.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given options
    pub fn new(options: &FetchOptions) -> Result<Self, CrawlError> {
        let mut headers = HeaderMap::new();
        let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(options.timeout)
            .build()
            .map_err(CrawlError::ClientBuildError)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<FetchedPage, CrawlError> {
        if url.is_empty() {
            return Err(CrawlError::MissingUrl);
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CrawlError::InvalidUrlScheme);
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(CrawlError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.text().await.map_err(CrawlError::from_reqwest)?;
        debug!(url, status = status.as_u16(), bytes = body.len(), "Fetched page");

        Ok(FetchedPage {
            url: url.to_string(),
            status_code: status.as_u16(),
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_builds_with_defaults() {
        let fetcher = HttpFetcher::new(&FetchOptions::default()).unwrap();
        assert_eq!(fetcher.name(), "http");
    }

    #[test]
    fn test_http_fetcher_invalid_user_agent_falls_back() {
        let options = FetchOptions {
            user_agent: Some("bad\nagent".to_string()),
            ..Default::default()
        };
        assert!(HttpFetcher::new(&options).is_ok());
    }

    #[tokio::test]
    async fn test_http_fetcher_rejects_bad_scheme() {
        let fetcher = HttpFetcher::new(&FetchOptions::default()).unwrap();
        let result = fetcher.fetch("ftp://docs.example.com/").await;
        assert!(matches!(result, Err(CrawlError::InvalidUrlScheme)));

        let result = fetcher.fetch("").await;
        assert!(matches!(result, Err(CrawlError::MissingUrl)));
    }
}
