// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (usage errors exit with 2)
// 2. Set up logging to stderr
// 3. Crawl from the seed URL
// 4. Append the visited URLs to the result file
// 5. Exit with proper code (0 = success, 1 = error, 2 = usage error)
// =============================================================================

mod cli;
mod crawl;
mod error;
mod fetch;
mod links;
mod output;
mod robots;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use crawl::{CrawlConfig, Crawler};
use fetch::HttpFetcher;
use output::CrawlReport;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = crawl finished and results were written
//   Err = something outside the crawl failed (e.g. result file not writable)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CrawlConfig {
        max_urls: cli.max_urls,
    };

    if !cli.json {
        println!("🔍 Crawling from: {}", cli.seed_url);
        println!("📊 Max URLs: {}", config.max_urls);
    }

    let fetcher = Arc::new(HttpFetcher::new().context("Failed to create HTTP client")?);
    let crawler = Crawler::new(fetcher, config);
    let visited = crawler.crawl(&cli.seed_url).await;

    let cap = output::line_cap(crawler.config().max_urls);
    let written = output::append_results(&cli.output, &visited, cap)?;

    if cli.json {
        let report = CrawlReport {
            seed: cli.seed_url.clone(),
            max_urls: config.max_urls,
            visited: visited.into_iter().collect(),
            output_file: cli.output.display().to_string(),
            lines_written: written,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("📄 Visited {} page(s)", visited.len());
        println!("💾 Appended {} line(s) to {}", written, cli.output.display());
    }

    Ok(0)
}

// Logs go to stderr so --json output on stdout stays clean.
// The level comes from -v flags only; no environment variables are read.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(format!("warn,seedcrawl={}", level)))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
