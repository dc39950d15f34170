// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawling starting from a seed URL
// - Configurable depth limit (0 = seed page only)
// - Every URL is crawled at most once, even with cyclic links
// - Every anchor link found on a crawled page is downloaded into the mirror
//
// Submodules:
// - crawler: the Crawler and its traversal loop
// - links: anchor link extraction from HTML
// - report: what the crawl visited, wrote and failed on
// =============================================================================

mod crawler;
mod links;
mod report;

// Re-export the public crawling API
pub use crawler::Crawler;
pub use report::{CrawlReport, FailureStage};
