//! Rewriting of relative references inside HTML filing documents.
//!
//! Filings link to their exhibits and images with paths relative to the
//! filing's own archive directory. A saved copy would render with broken
//! links, so hyperlink and image references are resolved to absolute URLs
//! before the document is written to disk.

use scraper::{Html, Node, Selector};
use url::Url;

/// Resolves relative `href` and `src` attributes against the document's own
/// download location.
///
/// Anchors are left untouched when they are in-page fragments (`#...`) or
/// already carry a scheme (`http...`). Image sources are always resolved;
/// joining an absolute source is a no-op. Filings are frequently malformed
/// HTML, so parsing is tolerant and resolution is best-effort: nothing in
/// here fails, the worst case is an attribute left as it was.
pub fn resolve_relative_urls(filing_text: &str, download_url: &str) -> String {
    let Ok(base_url) = Url::parse(download_url) else {
        return filing_text.to_string();
    };

    let mut document = Html::parse_document(filing_text);

    let anchors = Selector::parse("a[href]").expect("static selector");
    let images = Selector::parse("img[src]").expect("static selector");

    let mut rewrites = Vec::new();

    for element in document.select(&anchors) {
        if let Some(href) = element.value().attr("href") {
            // Do not resolve fragments or references that are already full URLs.
            if href.starts_with('#') || href.starts_with("http") {
                continue;
            }
            if let Ok(resolved) = base_url.join(href) {
                rewrites.push((element.id(), "href", resolved.to_string()));
            }
        }
    }

    for element in document.select(&images) {
        if let Some(src) = element.value().attr("src") {
            if let Ok(resolved) = base_url.join(src) {
                rewrites.push((element.id(), "src", resolved.to_string()));
            }
        }
    }

    for (node_id, attr_name, resolved) in rewrites {
        if let Some(mut node) = document.tree.get_mut(node_id) {
            if let Node::Element(element) = node.value() {
                for (name, value) in element.attrs.iter_mut() {
                    if &*name.local == attr_name {
                        *value = resolved.as_str().into();
                    }
                }
            }
        }
    }

    document.html()
}
