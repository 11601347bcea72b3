//! GitbookKit - GitBook documentation crawler
//!
//! This crate fetches pages from a GitBook-hosted site and turns them into
//! plain-text documents with `source` and `title` metadata.
//!
//! ## Crawl modes
//!
//! - Single page: fetch the entry URL and extract it.
//! - All paths: fetch `{base_url}/sitemap.xml`, resolve every `<loc>` path
//!   against the base URL and fetch the pages with up to `max_workers`
//!   requests in flight.
//!
//! ```no_run
//! # async fn example() -> Result<(), gitbookkit::CrawlError> {
//! let crawler = gitbookkit::GitbookCrawler::builder("https://docs.example.com/")
//!     .load_all_paths(true)
//!     .max_workers(4)
//!     .build()?;
//!
//! for page in crawler.load().await? {
//!     println!("{}: {}", page.metadata.source, page.metadata.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Fetchers
//!
//! Pages are retrieved through the [`PageFetcher`] trait. [`HttpFetcher`] is
//! the reqwest implementation used by [`CrawlerBuilder::build`]; any other
//! source can be plugged in with [`CrawlerBuilder::build_with_fetcher`].

pub mod config;
pub mod crawler;
pub mod document;
mod error;
pub mod extract;
pub mod fetchers;
pub mod sitemap;
mod types;

pub use config::{CrawlerBuilder, CrawlerConfig, FetchOptions};
pub use crawler::GitbookCrawler;
pub use document::{Element, ParsedDocument};
pub use error::CrawlError;
pub use extract::extract_page;
pub use fetchers::{FetchedPage, HttpFetcher, PageFetcher};
pub use sitemap::{parse_sitemap_paths, resolve_paths};
pub use types::{CrawlReport, CrawlStatus, PageFailure, PageMetadata, PageResult};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "GitbookKit/1.0";

/// Default CSS selector of the content region
pub const DEFAULT_CONTENT_SELECTOR: &str = "main";

/// Default number of concurrent page fetches
pub const DEFAULT_MAX_WORKERS: usize = 1;
