// src/crawl/report.rs
// =============================================================================
// What a crawl did: pages visited, files written, things that failed.
//
// #[derive(Serialize)] lets main.rs print the whole report with --json.
// =============================================================================

use serde::Serialize;
use std::path::PathBuf;

// Which step of the crawl a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// Fetching a page to look for links
    Page,
    /// Downloading a linked file into the mirror
    Download,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrawlFailure {
    pub url: String,
    pub stage: FailureStage,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    /// Pages fetched for link extraction, in visit order
    pub pages_visited: Vec<String>,
    /// Files written into the mirror
    pub downloaded: Vec<PathBuf>,
    pub failures: Vec<CrawlFailure>,
}

impl CrawlReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record_failure(&mut self, url: &str, stage: FailureStage, reason: String) {
        self.failures.push(CrawlFailure {
            url: url.to_string(),
            stage,
            reason,
        });
    }
}
