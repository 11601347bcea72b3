//! Parsed HTML document with a small query interface
//!
//! Wraps [`scraper::Html`] and exposes only the queries the crawler needs:
//! first match, all matches, nested first match, and joined text.

use scraper::{ElementRef, Html, Selector};

/// Elements whose text is never page content
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// A parsed HTML page
#[derive(Debug)]
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    /// Parse an HTML document
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// First element matching the selector, in document order
    pub fn find_first(&self, selector: &Selector) -> Option<Element<'_>> {
        self.html.select(selector).next().map(Element::new)
    }

    /// All elements matching the selector, in document order
    pub fn find_all(&self, selector: &Selector) -> Vec<Element<'_>> {
        self.html.select(selector).map(Element::new).collect()
    }
}

/// An element borrowed from a [`ParsedDocument`]
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

impl<'a> Element<'a> {
    fn new(inner: ElementRef<'a>) -> Self {
        Self { inner }
    }

    /// Local tag name
    pub fn name(&self) -> &'a str {
        self.inner.value().name()
    }

    /// First descendant element matching the selector
    pub fn find_first(&self, selector: &Selector) -> Option<Element<'a>> {
        self.inner.select(selector).next().map(Element::new)
    }

    /// Text of all descendant text nodes joined by `separator`
    ///
    /// Text inside script, style, noscript and template elements is skipped.
    /// Whitespace-only nodes are kept, so callers decide how to trim.
    pub fn text(&self, separator: &str) -> String {
        let root = self.inner.id();
        let parts: Vec<&'a str> = self
            .inner
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let hidden = node
                    .ancestors()
                    .take_while(|ancestor| ancestor.id() != root)
                    .filter_map(|ancestor| ancestor.value().as_element())
                    .any(|element| NON_CONTENT_ELEMENTS.contains(&element.name()));
                if hidden {
                    None
                } else {
                    Some(&**text)
                }
            })
            .collect();
        parts.join(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(css: &str) -> Selector {
        Selector::parse(css).unwrap()
    }

    #[test]
    fn test_find_first_and_text() {
        let doc = ParsedDocument::parse("<html><body><main><h1>T</h1>Body</main></body></html>");
        let main = doc.find_first(&selector("main")).unwrap();
        assert_eq!(main.name(), "main");
        assert_eq!(main.text("\n"), "T\nBody");
        assert_eq!(main.text(""), "TBody");
    }

    #[test]
    fn test_find_first_missing() {
        let doc = ParsedDocument::parse("<html><body><div>No main here</div></body></html>");
        assert!(doc.find_first(&selector("main")).is_none());
    }

    #[test]
    fn test_find_all_document_order() {
        let doc = ParsedDocument::parse(
            "<nav><a href='/a'>A</a></nav><main><a href='/b'>B</a><a href='/c'>C</a></main>",
        );
        let links: Vec<String> = doc
            .find_all(&selector("a"))
            .iter()
            .map(|link| link.text(""))
            .collect();
        assert_eq!(links, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_nested_find_first_is_scoped() {
        let doc = ParsedDocument::parse(
            "<header><h1>Site</h1></header><main><h2>Sub</h2><h1>Page</h1></main>",
        );
        let main = doc.find_first(&selector("main")).unwrap();
        let h1 = main.find_first(&selector("h1")).unwrap();
        assert_eq!(h1.text(""), "Page");
        assert!(main.find_first(&selector("footer")).is_none());
    }

    #[test]
    fn test_text_skips_scripts_and_styles() {
        let doc = ParsedDocument::parse(
            "<main><p>Visible</p><script>var hidden = 1;</script><style>p{}</style><p>Also</p></main>",
        );
        let main = doc.find_first(&selector("main")).unwrap();
        assert_eq!(main.text("|"), "Visible|Also");
    }

    #[test]
    fn test_text_decodes_entities() {
        let doc = ParsedDocument::parse("<main><p>Tom &amp; Jerry &lt;3</p></main>");
        let main = doc.find_first(&selector("main")).unwrap();
        assert_eq!(main.text("\n"), "Tom & Jerry <3");
    }
}
