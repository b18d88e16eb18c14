// src/crawl/queue.rs
// =============================================================================
// This module implements the crawl loop.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Take the next URL out of the frontier and fetch it
// 3. Extract the permitted links from the page
// 4. Add links we haven't visited yet to the frontier
// 5. Mark the URL visited
// 6. Repeat until the frontier is empty or we've visited max_urls pages
//
// Guarantees:
// - A URL is fetched at most once per crawl
// - At most max_urls fetch attempts, even if the site links forever
// - A failed fetch still counts as a visit and is never retried
//
// Collections:
// - BTreeSet for the frontier: duplicates collapse and the smallest URL
//   always comes out first, so a crawl is reproducible
// - BTreeSet for visited: returned sorted, ready to write out
// =============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::fetch::{get_page, Fetch};
use crate::links::extract_links;
use crate::robots::PermissionChecker;

// Default ceiling on the number of pages a crawl visits
pub const DEFAULT_MAX_URLS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Stop once this many URLs have been visited
    pub max_urls: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_urls: DEFAULT_MAX_URLS,
        }
    }
}

pub struct Crawler<F: ?Sized> {
    fetcher: Arc<F>,
    checker: PermissionChecker<F>,
    config: CrawlConfig,
}

impl<F> Crawler<F>
where
    F: Fetch + ?Sized,
{
    // Creates a crawler
    //
    // The same fetcher is used for pages and for robots.txt files.
    pub fn new(fetcher: Arc<F>, config: CrawlConfig) -> Self {
        let checker = PermissionChecker::new(Arc::clone(&fetcher));
        Self {
            fetcher,
            checker,
            config,
        }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    // Crawls starting from a seed URL
    //
    // Parameters:
    //   seed_url: the first URL to visit (used as given, not permission-checked)
    //
    // Returns: every URL a fetch was attempted for
    pub async fn crawl(&self, seed_url: &str) -> BTreeSet<String> {
        let mut frontier = BTreeSet::from([seed_url.to_string()]);
        let mut visited = BTreeSet::new();

        while visited.len() < self.config.max_urls {
            let Some(current) = frontier.pop_first() else {
                break;
            };

            if visited.contains(&current) {
                continue;
            }

            info!(url = %current, visited = visited.len(), "Crawling");

            let page = get_page(self.fetcher.as_ref(), &current).await;
            if !page.is_empty() {
                let links = extract_links(&self.checker, &current, &page).await;

                let before = frontier.len();
                frontier.extend(
                    links
                        .into_iter()
                        .filter(|link| *link != current && !visited.contains(link)),
                );
                debug!(url = %current, new = frontier.len() - before, "Frontier updated");
            }

            visited.insert(current);
        }

        info!(visited = visited.len(), pending = frontier.len(), "Crawl finished");
        visited
    }
}
