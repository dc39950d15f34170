// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// Two kinds of failure matter while crawling:
// - Transport: the network said no (timeout, DNS, connection refused)
// - Filesystem: we could not create a directory or write a file
//
// Everything else (bad seed URL, client setup) fails before the crawl starts.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[source]: keeps the underlying error in the error chain
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    /// A GET request failed before we got a usable body
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Creating a directory, creating a file or writing to it failed
    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl CrawlError {
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        CrawlError::Transport {
            url: url.into(),
            source,
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CrawlError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
