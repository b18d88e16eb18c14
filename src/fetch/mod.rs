// src/fetch/mod.rs
// =============================================================================
// This module fetches page content for the crawler.
//
// The Fetch trait is the seam between the crawler and the network:
// - HttpFetcher is the real thing (http/https over reqwest, file:// from disk)
// - Tests plug in small in-memory fakes so crawls are deterministic
//
// get_page() wraps any fetcher in the "never fails" contract the crawler
// relies on: every error is logged and turned into an empty string.
// =============================================================================

mod page;

pub use page::{get_page, Fetch, HttpFetcher};
