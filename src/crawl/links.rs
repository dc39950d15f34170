// src/crawl/links.rs
// =============================================================================
// This module extracts anchor links from HTML pages.
//
// One extraction pass serves two purposes:
// - the links to download into the mirror
// - the links to crawl next (when the depth limit allows)
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Rust concepts:
// - Option<T>: for links we decide to skip
// - Iterators: filter_map over the selected elements
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

// Extracts all anchor links from HTML content, resolved against the page URL
//
// Parameters:
//   html: the HTML content to parse
//   page_url: the URL the HTML came from (for resolving relative links)
//
// Returns: absolute http/https URLs in document order. A link that appears
// twice on the page is returned twice.
//
// Example:
//   html = "<a href='/docs/readme.txt'>Docs</a>"
//   page_url = "http://example.com/index.html"
//   result = ["http://example.com/docs/readme.txt"]
pub fn extract_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    // "a[href]" means "all <a> tags that have an href attribute"
    // The selector is a constant, so parsing it cannot fail
    let selector = Selector::parse("a[href]").expect("a[href] is a valid selector");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(page_url, href))
        .collect()
}

// Resolves a link (possibly relative) to an absolute URL
//
// Skipped:
// - in-page anchors (#section)
// - mailto:, tel:, javascript: and data: links
// - anything that does not resolve to http/https
//
// The fragment is dropped, so page.html#a and page.html#b are the same page.
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || has_skipped_scheme(href) {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}

fn has_skipped_scheme(href: &str) -> bool {
    const SKIPPED: [&str; 4] = ["mailto:", "tel:", "javascript:", "data:"];
    let lower = href.to_ascii_lowercase();
    SKIPPED.iter().any(|scheme| lower.starts_with(scheme))
}
