//! Sitemap parsing and path resolution
//!
//! Only the path component of each `<loc>` is kept; pages are always fetched
//! from the crawler's base URL, whatever host the sitemap advertises.

use crate::error::CrawlError;
use quick_xml::events::Event;
use quick_xml::Reader;
use url::Url;

/// File name of the sitemap under the base URL
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Extract the path of every `<loc>` element in a sitemap
///
/// `loc` elements are collected at any depth, so both `<urlset>` and
/// `<sitemapindex>` documents work. Every `loc` yields one path: duplicates
/// are kept and empty or self-closing entries give an empty path, which
/// resolves to the base URL itself.
///
/// # Errors
///
/// Returns [`CrawlError::SitemapError`] if the XML is malformed.
pub fn parse_sitemap_paths(xml: &str) -> Result<Vec<String>, CrawlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut paths = Vec::new();
    let mut current: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"loc" => {
                current = Some(String::new());
            }
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"loc" => {
                paths.push(String::new());
            }
            Ok(Event::Text(ref text)) => {
                if let Some(loc) = current.as_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| CrawlError::SitemapError(format!("Invalid XML: {}", e)))?;
                    loc.push_str(&unescaped);
                }
            }
            Ok(Event::CData(ref cdata)) => {
                if let Some(loc) = current.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(cdata));
                }
            }
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"loc" => {
                if let Some(loc) = current.take() {
                    paths.push(loc_path(loc.trim()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(CrawlError::SitemapError(format!(
                    "XML parsing error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paths)
}

/// Reduce a `<loc>` value to its path component
///
/// Relative values lose their query, fragment and any `//authority` prefix.
/// The result never starts with `//`, so joining it cannot change the host.
fn loc_path(loc: &str) -> String {
    let path = match Url::parse(loc) {
        Ok(url) => url.path().to_string(),
        Err(_) => relative_path(loc),
    };
    if path.starts_with("//") {
        format!("/{}", path.trim_start_matches('/'))
    } else {
        path
    }
}

fn relative_path(loc: &str) -> String {
    // The url crate treats '\\' as '/' in http(s) references
    let normalized = loc.replace('\\', "/");
    let reference = normalized.split(['?', '#']).next().unwrap_or_default();
    let path = match reference.strip_prefix("//") {
        Some(network_path) => network_path
            .find('/')
            .map_or("", |start| &network_path[start..]),
        None => reference,
    };
    path.to_string()
}

/// Resolve sitemap paths against the base URL
///
/// # Errors
///
/// Returns [`CrawlError::InvalidUrl`] if a path cannot be joined onto `base`.
pub fn resolve_paths(base: &Url, paths: &[String]) -> Result<Vec<Url>, CrawlError> {
    paths
        .iter()
        .map(|path| {
            base.join(path)
                .map_err(|e| CrawlError::invalid_url(path.as_str(), e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sitemap_paths() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://docs.example.com/guide/intro</loc>
    <lastmod>2024-01-01</lastmod>
  </url>
  <url>
    <loc>https://docs.example.com/api?tab=rest#top</loc>
  </url>
</urlset>"#;

        let paths = parse_sitemap_paths(xml).unwrap();
        assert_eq!(paths, vec!["/guide/intro", "/api"]);
    }

    #[test]
    fn test_parse_sitemap_index_and_prefixes() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<sm:sitemapindex xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sm:sitemap><sm:loc>https://docs.example.com/sitemap-pages.xml</sm:loc></sm:sitemap>
</sm:sitemapindex>"#;

        let paths = parse_sitemap_paths(xml).unwrap();
        assert_eq!(paths, vec!["/sitemap-pages.xml"]);
    }

    #[test]
    fn test_parse_sitemap_relative_and_escaped() {
        let xml = r#"<urlset>
  <url><loc>/relative/page?x=1</loc></url>
  <url><loc><![CDATA[https://docs.example.com/cdata]]></loc></url>
  <url><loc>https://docs.example.com/a&amp;b</loc></url>
</urlset>"#;

        let paths = parse_sitemap_paths(xml).unwrap();
        assert_eq!(paths, vec!["/relative/page", "/cdata", "/a&b"]);
    }

    #[test]
    fn test_parse_sitemap_keeps_duplicates() {
        let xml = "<urlset><url><loc>https://docs.example.com/a</loc></url><url><loc>https://docs.example.com/a</loc></url></urlset>";
        let paths = parse_sitemap_paths(xml).unwrap();
        assert_eq!(paths, vec!["/a", "/a"]);
    }

    #[test]
    fn test_parse_sitemap_keeps_empty_locs() {
        let xml = r#"<urlset>
  <url><loc>https://docs.example.com/a</loc></url>
  <url><loc></loc></url>
  <url><loc/></url>
  <url><loc>   </loc></url>
</urlset>"#;

        let paths = parse_sitemap_paths(xml).unwrap();
        assert_eq!(paths, vec!["/a", "", "", ""]);

        let base = Url::parse("https://docs.example.com").unwrap();
        let urls = resolve_paths(&base, &paths).unwrap();
        assert_eq!(urls.len(), 4);
        assert_eq!(urls[1].as_str(), "https://docs.example.com/");
        assert_eq!(urls[2].as_str(), "https://docs.example.com/");
    }

    #[test]
    fn test_network_path_locs_stay_on_base_host() {
        let xml = r#"<urlset>
  <url><loc>//evil.example.net/guide</loc></url>
  <url><loc>//evil.example.net/api?x=/y#z</loc></url>
  <url><loc>//evil.example.net</loc></url>
  <url><loc>\\evil.example.net\setup</loc></url>
  <url><loc>///evil.example.net/deep</loc></url>
  <url><loc>////evil.example.net/deeper</loc></url>
  <url><loc>https://docs.example.com//evil.example.net/x</loc></url>
</urlset>"#;

        let paths = parse_sitemap_paths(xml).unwrap();
        assert_eq!(
            paths,
            vec![
                "/guide",
                "/api",
                "",
                "/setup",
                "/evil.example.net/deep",
                "/evil.example.net/deeper",
                "/evil.example.net/x"
            ]
        );

        let base = Url::parse("https://docs.example.com").unwrap();
        let urls = resolve_paths(&base, &paths).unwrap();
        for url in &urls {
            assert_eq!(url.host_str(), Some("docs.example.com"));
        }
        assert_eq!(urls[0].as_str(), "https://docs.example.com/guide");
        assert_eq!(urls[1].as_str(), "https://docs.example.com/api");
    }

    #[test]
    fn test_parse_sitemap_empty() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
</urlset>"#;

        assert!(parse_sitemap_paths(xml).unwrap().is_empty());
    }

    #[test]
    fn test_parse_sitemap_malformed() {
        let xml = "<urlset><url><loc>https://docs.example.com/a</url></urlset>";
        let result = parse_sitemap_paths(xml);
        assert!(matches!(result, Err(CrawlError::SitemapError(_))));
    }

    #[test]
    fn test_resolve_paths() {
        let base = Url::parse("https://docs.example.com").unwrap();
        let paths = vec!["/guide/intro".to_string(), "/".to_string()];
        let urls = resolve_paths(&base, &paths).unwrap();
        assert_eq!(urls[0].as_str(), "https://docs.example.com/guide/intro");
        assert_eq!(urls[1].as_str(), "https://docs.example.com/");
    }

    #[test]
    fn test_resolve_paths_replaces_host() {
        let base = Url::parse("http://127.0.0.1:8080").unwrap();
        let paths = vec![loc_path("https://docs.example.com/guide/intro")];
        let urls = resolve_paths(&base, &paths).unwrap();
        assert_eq!(urls[0].as_str(), "http://127.0.0.1:8080/guide/intro");
    }

    #[test]
    fn test_resolve_relative_path_against_base_path() {
        let base = Url::parse("https://docs.example.com/v2").unwrap();
        let urls = resolve_paths(&base, &["intro".to_string()]).unwrap();
        assert_eq!(urls[0].as_str(), "https://docs.example.com/intro");
    }
}
