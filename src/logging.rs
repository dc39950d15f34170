// src/logging.rs
// =============================================================================
// This module sets up the crawl log: an append-only plain-text file.
//
// What gets logged:
// - every page crawled and every file downloaded (info)
// - pages or files that came back with a non-2xx status (warn)
// - fetch and download failures, with the URL and the error (error)
//
// Nothing here installs a global logger. We build a tracing Dispatch and the
// caller hands it to the Crawler, which sends its events there.
//
// Rust concepts:
// - tracing: structured logging with info!/warn!/error! macros
// - Mutex<File>: lets the log writer be shared safely
// =============================================================================

use crate::error::{CrawlError, Result};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

// Environment variable that overrides the log level (e.g. REQUIEM_LOG=debug)
pub const LOG_ENV: &str = "REQUIEM_LOG";

// Opens (or creates) the log file for appending and builds a dispatch for it
//
// Parameters:
//   path: the log file; missing parent directories are created
//
// Returns: a Dispatch to hand to Crawler::new
pub fn file_dispatch(path: &Path) -> Result<Dispatch> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CrawlError::filesystem(parent, e))?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CrawlError::filesystem(path, e))?;

    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .finish();

    Ok(Dispatch::new(subscriber))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a Dispatch?
//    - It is a handle to a tracing subscriber (the thing that writes events)
//    - Cloning it is cheap; every clone writes to the same file
//
// 2. Why append(true)?
//    - Each run adds to the end of the file instead of wiping earlier runs
//
// 3. Why with_ansi(false)?
//    - Color codes are for terminals; in a file they are just noise
// -----------------------------------------------------------------------------
