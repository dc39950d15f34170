// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Open the log file and build the crawler's logger
// 3. Run the crawl
// 4. Print a summary (or the JSON report)
// 5. Exit with proper code (0 = clean crawl, 1 = some failures, 2 = error)
//
// Rust concepts used:
// - async/await: reqwest is async, tokio drives it
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - crawl settings
mod crawl; // src/crawl/ - traversal and link extraction
mod error; // src/error.rs - CrawlError
mod http; // src/http.rs - HTTP client helpers
mod logging; // src/logging.rs - log file setup
mod mirror; // src/mirror/ - local mirror paths and downloads

use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use config::CrawlConfig;
use crawl::{CrawlReport, Crawler, FailureStage};

// anyhow::Result lets us return any error type with the ? operator
use anyhow::{Context, Result};

const BANNER: &str = r#"
welcome to:
  ____  _____ ___  _   _ ___ _____ __  __
 |  _ \| ____/ _ \| | | |_ _| ____|  \/  |
 | |_) |  _|| | | | | | || ||  _| | |\/| |
 |  _ <| |__| |_| | |_| || || |___| |  | |
 |_| \_\_____\__\_\\___/|___|_____|_|  |_|
"#;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = every page and download succeeded
//   Ok(1) = crawl finished, but something failed along the way
//   Err   = the crawl could not start or was aborted (--fail-fast)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    if !cli.json {
        println!("{}", BANNER);
    }

    let config = CrawlConfig::from_cli(&cli)?;

    // The crawler gets its logger handed in; we own it for the whole run
    let logger = logging::file_dispatch(&cli.log_file)
        .with_context(|| format!("could not open log file {}", cli.log_file.display()))?;

    let mut crawler = Crawler::new(config, logger)?;

    if !cli.json {
        println!("🔍 Crawling: {}", cli.url);
        println!("📊 Max depth: {}", cli.depth);
        println!("📁 Mirror: {}\n", crawler.config().mirror_root().display());
    }

    let report = crawler.crawl().await.context("crawl aborted")?;

    if cli.json {
        // Progress lines are off in this mode, so stdout is only the report
        println!("{}", render_json(&report)?);
    } else {
        print_summary(&report, crawler.visited().len());
    }

    Ok(if report.is_clean() { 0 } else { 1 })
}

fn render_json(report: &CrawlReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn print_summary(report: &CrawlReport, unique_urls: usize) {
    println!();

    if !report.failures.is_empty() {
        println!("{:<60} {:<10} {}", "URL", "STAGE", "REASON");
        println!("{}", "=".repeat(105));
        for failure in &report.failures {
            let stage = match failure.stage {
                FailureStage::Page => "page",
                FailureStage::Download => "download",
            };
            println!("{:<60} {:<10} {}", failure.url, stage, failure.reason);
        }
        println!();
    }

    println!("📊 Summary:");
    println!("   🔗 Unique URLs visited: {}", unique_urls);
    println!("   📄 Pages crawled: {}", report.pages_visited.len());
    println!("   💾 Files downloaded: {}", report.downloaded.len());
    println!("   ❌ Failures: {}", report.failures.len());
}
