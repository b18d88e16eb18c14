// src/crawl/mod.rs
// =============================================================================
// This module drives the crawl.
//
// Features:
// - Visits pages one at a time, starting from a single seed URL
// - Follows only links the robots.txt checker allows
// - Never fetches the same URL twice
// - Hard ceiling on the number of pages visited (default: 10)
// =============================================================================

mod queue;

pub use queue::{CrawlConfig, Crawler, DEFAULT_MAX_URLS};
