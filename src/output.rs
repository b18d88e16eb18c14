// src/output.rs
// =============================================================================
// Writes crawl results.
//
// - The result file gets one URL per line and is appended to, never
//   truncated, so repeated runs accumulate
// - The JSON report is what --json prints to stdout
// =============================================================================

use std::collections::BTreeSet;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

// Default result file, relative to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "crawled.txt";

// How many lines one run may append
//
// This is one more than the crawl ceiling (11 for the default of 10).
// The extra line is long-standing behaviour of the result file and is
// kept as is; the crawl itself never visits more than max_urls pages.
pub fn line_cap(max_urls: usize) -> usize {
    max_urls.saturating_add(1)
}

// Appends visited URLs to the result file, one per line
//
// Parameters:
//   path: the result file (created if missing)
//   visited: URLs to write, in order
//   cap: maximum number of lines to write
//
// Returns: how many lines were written
pub fn append_results(path: &Path, visited: &BTreeSet<String>, cap: usize) -> Result<usize> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open result file {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    let mut written = 0;
    for url in visited.iter().take(cap) {
        writeln!(writer, "{}", url)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
        written += 1;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(written)
}

// Summary of one crawl, printed with --json
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    pub max_urls: usize,
    pub visited: Vec<String>,
    pub output_file: String,
    pub lines_written: usize,
}
