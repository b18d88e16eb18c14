// src/links/mod.rs
// =============================================================================
// This module pulls crawlable links out of HTML pages.
//
// Submodules:
// - html: finds <a href> targets, resolves them, filters them through
//   the robots.txt permission check
// =============================================================================

mod html;

pub use html::extract_links;
