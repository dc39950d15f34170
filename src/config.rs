// src/config.rs
// =============================================================================
// Crawl configuration.
//
// All settings come from the command line; there is no config file.
// CrawlConfig can also be built directly (tests do this) with the
// with_* builder methods.
// =============================================================================

use crate::cli::Cli;
use crate::error::{CrawlError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

// What to do when downloading a linked file fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadErrorPolicy {
    /// Log the failure, record it in the report and keep crawling
    #[default]
    Continue,
    /// Return the error from the crawl immediately
    Abort,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed: Url,
    pub max_depth: usize,
    pub output_dir: PathBuf,
    pub timeout: Duration,
    pub on_download_error: DownloadErrorPolicy,
    // Print "Crawling ..." / "Downloaded ..." lines on stdout
    pub progress: bool,
}

impl CrawlConfig {
    pub fn new(seed: &str) -> Result<Self> {
        let mut seed = Url::parse(seed).map_err(|e| CrawlError::InvalidUrl {
            url: seed.to_string(),
            reason: e.to_string(),
        })?;

        if seed.host_str().is_none() {
            return Err(CrawlError::InvalidUrl {
                url: seed.to_string(),
                reason: "URL has no host".to_string(),
            });
        }
        // Same normalization links get, so the seed dedups against them
        seed.set_fragment(None);

        Ok(Self {
            seed,
            max_depth: 1,
            output_dir: PathBuf::from("."),
            timeout: Duration::from_secs(10),
            on_download_error: DownloadErrorPolicy::Continue,
            progress: true,
        })
    }

    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let policy = if cli.fail_fast {
            DownloadErrorPolicy::Abort
        } else {
            DownloadErrorPolicy::Continue
        };

        Ok(Self::new(&cli.url)?
            .with_max_depth(cli.depth)
            .with_output_dir(&cli.output)
            .with_timeout(Duration::from_secs(cli.timeout))
            .with_download_error_policy(policy)
            // stdout carries only the JSON report in --json mode
            .with_progress(!cli.json))
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_download_error_policy(mut self, policy: DownloadErrorPolicy) -> Self {
        self.on_download_error = policy;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    // The seed's host names the root directory of the mirror.
    // new() rejects host-less seeds, so this is always present.
    pub fn seed_host(&self) -> &str {
        self.seed.host_str().unwrap_or_default()
    }

    pub fn mirror_root(&self) -> PathBuf {
        self.output_dir.join(self.seed_host())
    }
}
