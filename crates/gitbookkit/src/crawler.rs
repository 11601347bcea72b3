//! GitBook crawler
//!
//! A crawl fetches one start document, works out the page URLs from it and
//! then fetches and extracts those pages with bounded concurrency:
//!
//! - single page: the start document *is* the page and is extracted as-is
//! - all paths: the start document is `{base_url}/sitemap.xml`; every `<loc>`
//!   path is joined onto the base URL and fetched
//!
//! Pages are collected in completion order. The start fetch is the only
//! fatal step; page failures are recorded in [`CrawlReport::failures`].

use crate::config::{CrawlerBuilder, CrawlerConfig};
use crate::document::ParsedDocument;
use crate::error::CrawlError;
use crate::extract::extract_page;
use crate::fetchers::{FetchedPage, PageFetcher};
use crate::sitemap::{parse_sitemap_paths, resolve_paths};
use crate::types::{CrawlReport, CrawlStatus, PageFailure, PageResult};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

/// Crawler for a GitBook-hosted documentation site
pub struct GitbookCrawler {
    config: CrawlerConfig,
    fetcher: Box<dyn PageFetcher>,
}

impl GitbookCrawler {
    /// Create a crawler builder for the given entry page
    pub fn builder(entry_url: impl Into<String>) -> CrawlerBuilder {
        CrawlerBuilder::new(entry_url)
    }

    pub(crate) fn new(config: CrawlerConfig, fetcher: Box<dyn PageFetcher>) -> Self {
        Self { config, fetcher }
    }

    /// Crawler configuration
    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Fetch and extract pages
    ///
    /// Pages whose fetch fails are logged and left out; use [`crawl`](Self::crawl)
    /// to see them. With [`HttpFetcher`](crate::HttpFetcher), a page answering
    /// with a non-2xx status counts as a failed fetch
    /// ([`CrawlError::HttpStatus`]) and its body is not extracted. A non-2xx
    /// answer for the start URL fails the whole call.
    pub async fn load(&self) -> Result<Vec<PageResult>, CrawlError> {
        Ok(self.crawl().await?.pages)
    }

    /// Fetch and extract pages, reporting per-page failures
    ///
    /// Non-2xx pages appear in [`CrawlReport::failures`] as
    /// [`CrawlError::HttpStatus`] messages rather than in `pages`.
    pub async fn crawl(&self) -> Result<CrawlReport, CrawlError> {
        self.crawl_with_status(|_| {}).await
    }

    /// Page URLs a crawl would process, without fetching the pages
    ///
    /// In single-page mode this is the entry URL and nothing is fetched.
    pub async fn discover_urls(&self) -> Result<Vec<String>, CrawlError> {
        let start = self.config.start_url();
        if !self.config.load_all_paths() {
            return Ok(vec![start]);
        }
        let sitemap = self.fetch_start(&start).await?;
        self.sitemap_urls(&sitemap)
    }

    /// Crawl with status updates
    pub async fn crawl_with_status<S>(
        &self,
        mut status_callback: S,
    ) -> Result<CrawlReport, CrawlError>
    where
        S: FnMut(CrawlStatus),
    {
        let start = self.config.start_url();
        status_callback(
            CrawlStatus::new("discover")
                .with_message(start.as_str())
                .with_percent(0.0),
        );

        let root = self.fetch_start(&start).await?;

        let report = if self.config.load_all_paths() {
            let urls = self.sitemap_urls(&root)?;
            info!(pages = urls.len(), "Discovered pages in sitemap");
            self.crawl_pages(urls, &mut status_callback).await
        } else {
            let pages: Vec<PageResult> = self.extract(&root.body, &start).into_iter().collect();
            if pages.is_empty() {
                debug!(url = %start, selector = self.config.content_selector(), "No content region");
            }
            status_callback(
                CrawlStatus::new("fetch")
                    .with_message(start.as_str())
                    .with_percent(100.0),
            );
            CrawlReport {
                pages,
                failures: Vec::new(),
            }
        };

        info!(
            pages = report.pages.len(),
            failures = report.failures.len(),
            "Crawl complete"
        );
        status_callback(CrawlStatus::new("complete").with_percent(100.0));

        Ok(report)
    }

    async fn fetch_start(&self, url: &str) -> Result<FetchedPage, CrawlError> {
        debug!(url, fetcher = self.fetcher.name(), "Fetching start document");
        self.fetcher.fetch(url).await
    }

    fn sitemap_urls(&self, sitemap: &FetchedPage) -> Result<Vec<String>, CrawlError> {
        let paths = parse_sitemap_paths(&sitemap.body)?;
        let urls = resolve_paths(self.config.base(), &paths)?;
        Ok(urls.into_iter().map(String::from).collect())
    }

    async fn crawl_pages<S>(&self, urls: Vec<String>, status_callback: &mut S) -> CrawlReport
    where
        S: FnMut(CrawlStatus),
    {
        let total = urls.len();
        let mut report = CrawlReport::default();
        let mut finished = 0usize;

        let mut tasks = stream::iter(urls)
            .map(|url| async move {
                let outcome = self.load_page(&url).await;
                (url, outcome)
            })
            .buffer_unordered(self.config.max_workers());

        while let Some((url, outcome)) = tasks.next().await {
            finished += 1;
            let status = CrawlStatus::new("fetch")
                .with_message(url.as_str())
                .with_percent(finished as f32 / total as f32 * 100.0);

            match outcome {
                Ok(Some(page)) => report.pages.push(page),
                Ok(None) => {
                    debug!(url = %url, selector = self.config.content_selector(), "No content region");
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Failed to fetch page");
                    report.failures.push(PageFailure {
                        url,
                        error: e.to_string(),
                    });
                }
            }

            status_callback(status);
        }

        report
    }

    async fn load_page(&self, url: &str) -> Result<Option<PageResult>, CrawlError> {
        debug!(url, "Fetching page");
        let page = self.fetcher.fetch(url).await?;
        Ok(self.extract(&page.body, url))
    }

    fn extract(&self, body: &str, source: &str) -> Option<PageResult> {
        let doc = ParsedDocument::parse(body);
        extract_page(
            &doc,
            self.config.selector(),
            self.config.title_selector(),
            source,
        )
    }
}
