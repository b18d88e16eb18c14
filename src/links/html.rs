// src/links/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, so broken markup is repaired, not rejected
//
// That gives us, for free:
// - href values in double quotes, single quotes or no quotes
// - case-insensitive tag and attribute names (<A HREF=...>)
// - any whitespace or other attributes before href
//
// We also use the `url` crate to resolve relative links against the page
// they were found on, and the robots.txt checker to drop links we are not
// allowed to crawl.
// =============================================================================

use std::collections::BTreeSet;

use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::fetch::Fetch;
use crate::robots::PermissionChecker;

// Extracts all permitted links from HTML content
//
// Parameters:
//   checker: decides which resolved links we may crawl
//   base_url: the URL of the page (for resolving relative links)
//   html: the HTML content to parse
//
// Returns: the set of absolute, permitted URLs found on the page
//
// Example:
//   html = "<a href='page2.html'>Next</a>"
//   base_url = "http://example.com/a/page1.html"
//   result = {"http://example.com/a/page2.html"}
pub async fn extract_links<F>(
    checker: &PermissionChecker<F>,
    base_url: &str,
    html: &str,
) -> BTreeSet<String>
where
    F: Fetch + ?Sized,
{
    // Resolve everything first: the parsed document is dropped before we
    // start awaiting robots.txt lookups
    let candidates = resolve_targets(base_url, html);

    let mut links = BTreeSet::new();
    for candidate in candidates {
        if checker.is_permitted(&candidate).await {
            links.insert(candidate);
        }
    }

    debug!(page = %base_url, found = links.len(), "Extracted links");
    links
}

// Finds every <a href> on the page and resolves it to an absolute URL
//
// Duplicates collapse here, so each distinct target is only
// permission-checked once.
fn resolve_targets(base_url: &str, html: &str) -> BTreeSet<String> {
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            // If the base URL is invalid, we can't resolve relative links
            warn!(url = %base_url, error = %e, "Invalid base URL, skipping link extraction");
            return BTreeSet::new();
        }
    };

    let Ok(selector) = Selector::parse("a[href]") else {
        return BTreeSet::new();
    };

    let document = Html::parse_document(html);

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_url(&base, href))
        .collect()
}

// Resolves a possibly-relative URL to an absolute URL
//
// Examples:
//   base = "http://example.com/a/page1.html"
//   href = "page2.html"        -> Some("http://example.com/a/page2.html")
//   href = "/docs"             -> Some("http://example.com/docs")
//   href = "#top"              -> Some("http://example.com/a/page1.html#top")
//   href = "https://other.com" -> Some("https://other.com/")
//   href = "http://[bad"       -> None
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(String::from)
}
