// src/robots/mod.rs
// =============================================================================
// Polite crawling: robots.txt parsing and the per-address permission check.
//
// Submodules:
// - policy: parses robots.txt and matches paths against its rules
// - checker: decides whether a single address may be fetched
// =============================================================================

mod checker;
mod policy;

pub use checker::PermissionChecker;
