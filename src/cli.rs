// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The interface is deliberately small:
//   requiem <URL> [-d DEPTH] [-o DIR] [--log-file PATH] [--timeout SECS]
//                 [--fail-fast] [--json]
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate parsing code for our types
// - Default values: #[arg(default_value_t = ...)]
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "requiem",
    version = "0.1.0",
    about = "Recursively crawl a website and mirror every linked file to disk",
    long_about = "requiem starts from a seed URL, follows anchor links up to a maximum depth \
                  and downloads every linked resource into a directory named after the seed's host."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com/index.html)
    ///
    /// This is a positional argument (required, no flag needed)
    pub url: String,

    /// Maximum crawl depth (default: 1)
    ///
    /// Depth 0 = download the files linked from the seed page only
    /// Depth 1 = also crawl every page the seed links to
    /// etc.
    #[arg(short = 'd', long = "depth", default_value_t = 1)]
    pub depth: usize,

    /// Directory the mirror tree is created in
    #[arg(short = 'o', long = "output", default_value = ".")]
    pub output: PathBuf,

    /// Append-only log file for fetch failures and crawl events
    #[arg(long = "log-file", default_value = "requiem.log")]
    pub log_file: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Stop the whole crawl on the first failed download
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Print the crawl report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}


// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Positional vs flag arguments
//    - A field without #[arg(short/long)] is positional: `requiem URL`
//    - short = 'd' gives `-d 2`, long = "depth" gives `--depth 2`
//
// 2. Why PathBuf for paths?
//    - PathBuf is the owned, platform-aware path type
//    - clap can parse it directly from the command line
//
// 3. What is parse_from?
//    - Same as parse(), but takes the arguments from an iterator
//    - Handy in tests where there is no real command line
// -----------------------------------------------------------------------------
