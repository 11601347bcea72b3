//! Page extraction: content region and title to [`PageResult`]

use crate::document::ParsedDocument;
use crate::types::PageResult;
use scraper::Selector;

/// Separator placed between text nodes of the content region
pub const TEXT_SEPARATOR: &str = "\n";

/// Selector of the title element inside the content region
pub const TITLE_SELECTOR: &str = "h1";

/// Extract a page from a parsed document
///
/// Returns `None` when nothing matches `content_selector`; such pages are
/// skipped rather than reported as errors. The title is the text of the
/// first `title_selector` match inside the content region, untrimmed.
/// `source` is recorded verbatim.
pub fn extract_page(
    doc: &ParsedDocument,
    content_selector: &Selector,
    title_selector: &Selector,
    source: &str,
) -> Option<PageResult> {
    let content = doc.find_first(content_selector)?;
    let text = content.text(TEXT_SEPARATOR);

    let title = content
        .find_first(title_selector)
        .map(|h1| h1.text(""))
        .unwrap_or_default();

    Some(PageResult::new(text.trim(), source, title))
}
