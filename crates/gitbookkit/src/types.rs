//! Core types for GitbookKit

use serde::{Deserialize, Serialize};

/// Metadata attached to every extracted page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// URL the page was fetched from
    pub source: String,

    /// Text of the first `h1` in the content region, empty if none
    pub title: String,
}

/// Plain-text document extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// Extracted text, trimmed
    pub content: String,

    /// Page metadata
    pub metadata: PageMetadata,
}

impl PageResult {
    /// Create a page result
    pub fn new(
        content: impl Into<String>,
        source: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            metadata: PageMetadata {
                source: source.into(),
                title: title.into(),
            },
        }
    }
}

/// A page that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFailure {
    /// URL that failed
    pub url: String,

    /// Error message
    pub error: String,
}

/// Outcome of a crawl: the pages that were extracted and the ones that failed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Extracted pages, in completion order
    pub pages: Vec<PageResult>,

    /// Pages whose fetch failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<PageFailure>,
}

impl CrawlReport {
    /// True if every fetched page succeeded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Progress update during a crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlStatus {
    /// Current phase ("discover", "fetch", "complete")
    pub phase: String,
    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Estimated completion percentage (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_complete: Option<f32>,
}

impl CrawlStatus {
    /// Create a new status with phase
    pub fn new(phase: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            message: None,
            percent_complete: None,
        }
    }

    /// Set message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set completion percentage
    pub fn with_percent(mut self, percent: f32) -> Self {
        self.percent_complete = Some(percent);
        self
    }
}
