// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   seedcrawl <SEED_URL> [--max-urls N] [--output FILE] [--json] [-v]
//
// Exactly one positional argument is accepted. Missing or extra
// positional arguments are usage errors: clap prints the usage message
// and exits with status 2.
// =============================================================================

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::crawl::DEFAULT_MAX_URLS;
use crate::output::DEFAULT_OUTPUT_FILE;

#[derive(Parser, Debug)]
#[command(
    name = "seedcrawl",
    version,
    about = "Politely crawl a handful of pages starting from one URL",
    long_about = "seedcrawl starts at a seed URL, follows links that robots.txt allows, \
                  and stops after visiting a fixed number of pages. The visited URLs are \
                  appended to a result file, one per line."
)]
pub struct Cli {
    /// Absolute URL to start from (http, https or file)
    pub seed_url: String,

    /// Maximum number of pages to visit
    #[arg(long, default_value_t = DEFAULT_MAX_URLS)]
    pub max_urls: usize,

    /// File the visited URLs are appended to
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Print a JSON crawl report on stdout
    #[arg(long)]
    pub json: bool,

    /// More log output (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_seed_with_defaults() {
        let cli = Cli::try_parse_from(["seedcrawl", "http://example.com/"]).unwrap();
        assert_eq!(cli.seed_url, "http://example.com/");
        assert_eq!(cli.max_urls, 10);
        assert_eq!(cli.output, PathBuf::from("crawled.txt"));
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_missing_seed_is_a_usage_error() {
        assert!(Cli::try_parse_from(["seedcrawl"]).is_err());
    }

    #[test]
    fn test_extra_positional_is_a_usage_error() {
        let result = Cli::try_parse_from(["seedcrawl", "http://a.test/", "http://b.test/"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "seedcrawl",
            "--max-urls",
            "3",
            "--output",
            "out.txt",
            "--json",
            "-vv",
            "file:///tmp/index.html",
        ])
        .unwrap();
        assert_eq!(cli.max_urls, 3);
        assert_eq!(cli.output, PathBuf::from("out.txt"));
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.seed_url, "file:///tmp/index.html");
    }
}
