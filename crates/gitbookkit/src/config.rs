//! Crawler configuration and builder

use crate::crawler::GitbookCrawler;
use crate::error::CrawlError;
use crate::extract::TITLE_SELECTOR;
use crate::fetchers::{HttpFetcher, PageFetcher};
use crate::sitemap::SITEMAP_FILE;
use crate::{DEFAULT_CONTENT_SELECTOR, DEFAULT_MAX_WORKERS};
use scraper::Selector;
use std::time::Duration;
use url::Url;

/// Default total request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options for the HTTP fetcher
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Total timeout per request
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Validated crawler configuration
///
/// Built by [`CrawlerBuilder`]; immutable afterwards.
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    entry_url: String,
    load_all_paths: bool,
    base_url: String,
    base: Url,
    content_selector: String,
    selector: Selector,
    title_selector: Selector,
    max_workers: usize,
}

impl CrawlerConfig {
    /// Page the crawl starts from
    pub fn entry_url(&self) -> &str {
        &self.entry_url
    }

    /// Whether every sitemap page is crawled
    pub fn load_all_paths(&self) -> bool {
        self.load_all_paths
    }

    /// Base URL with its trailing slash stripped
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// CSS selector of the content region
    pub fn content_selector(&self) -> &str {
        &self.content_selector
    }

    /// Maximum number of pages fetched concurrently
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// URL fetched first: the sitemap, or the entry page itself
    pub fn start_url(&self) -> String {
        if self.load_all_paths {
            format!("{}/{}", self.base_url, SITEMAP_FILE)
        } else {
            self.entry_url.clone()
        }
    }

    pub(crate) fn base(&self) -> &Url {
        &self.base
    }

    pub(crate) fn selector(&self) -> &Selector {
        &self.selector
    }

    pub(crate) fn title_selector(&self) -> &Selector {
        &self.title_selector
    }
}

/// Builder for configuring a [`GitbookCrawler`]
#[derive(Debug, Clone)]
pub struct CrawlerBuilder {
    entry_url: String,
    load_all_paths: bool,
    base_url: Option<String>,
    content_selector: String,
    max_workers: usize,
    fetch_options: FetchOptions,
}

impl CrawlerBuilder {
    /// Create a builder for the given entry page
    pub fn new(entry_url: impl Into<String>) -> Self {
        Self {
            entry_url: entry_url.into(),
            load_all_paths: false,
            base_url: None,
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            max_workers: DEFAULT_MAX_WORKERS,
            fetch_options: FetchOptions::default(),
        }
    }

    /// Crawl every page listed in the sitemap instead of only the entry page
    pub fn load_all_paths(mut self, enable: bool) -> Self {
        self.load_all_paths = enable;
        self
    }

    /// Set the base URL sitemap paths are resolved against
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the CSS selector of the content region
    pub fn content_selector(mut self, selector: impl Into<String>) -> Self {
        self.content_selector = selector.into();
        self
    }

    /// Set the maximum number of concurrent page fetches
    pub fn max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.fetch_options.user_agent = Some(ua.into());
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.fetch_options.timeout = timeout;
        self
    }

    /// Validate the settings into a [`CrawlerConfig`]
    pub fn config(&self) -> Result<CrawlerConfig, CrawlError> {
        if self.entry_url.is_empty() {
            return Err(CrawlError::MissingUrl);
        }
        if !self.entry_url.starts_with("http://") && !self.entry_url.starts_with("https://") {
            return Err(CrawlError::InvalidUrlScheme);
        }
        Url::parse(&self.entry_url).map_err(|e| CrawlError::invalid_url(&self.entry_url, e))?;

        let raw_base = self
            .base_url
            .as_deref()
            .filter(|base| !base.is_empty())
            .unwrap_or(&self.entry_url);
        let base_url = raw_base.strip_suffix('/').unwrap_or(raw_base).to_string();
        let base = Url::parse(&base_url).map_err(|e| CrawlError::invalid_url(&base_url, e))?;

        let selector = Selector::parse(&self.content_selector).map_err(|e| {
            CrawlError::InvalidSelector(format!("'{}': {}", self.content_selector, e))
        })?;
        let title_selector = Selector::parse(TITLE_SELECTOR)
            .map_err(|e| CrawlError::InvalidSelector(format!("'{}': {}", TITLE_SELECTOR, e)))?;

        if self.max_workers == 0 {
            return Err(CrawlError::InvalidWorkerCount);
        }

        Ok(CrawlerConfig {
            entry_url: self.entry_url.clone(),
            load_all_paths: self.load_all_paths,
            base_url,
            base,
            content_selector: self.content_selector.clone(),
            selector,
            title_selector,
            max_workers: self.max_workers,
        })
    }

    /// Build a crawler that fetches over HTTP
    pub fn build(self) -> Result<GitbookCrawler, CrawlError> {
        let config = self.config()?;
        let fetcher = HttpFetcher::new(&self.fetch_options)?;
        Ok(GitbookCrawler::new(config, Box::new(fetcher)))
    }

    /// Build a crawler that uses a custom page fetcher
    pub fn build_with_fetcher<F>(self, fetcher: F) -> Result<GitbookCrawler, CrawlError>
    where
        F: PageFetcher + 'static,
    {
        let config = self.config()?;
        Ok(GitbookCrawler::new(config, Box::new(fetcher)))
    }
}
