// src/crawl/crawler.rs
// =============================================================================
// This module implements the recursive crawl with a depth-first approach.
//
// How it works:
// 1. Start with the seed URL (depth 0) on a stack
// 2. Pop a URL; skip it if we've already visited it, otherwise mark it visited
// 3. Fetch the page HTML
// 4. Extract every anchor link and download each one into the mirror
// 5. If depth < max depth, push the links (depth + 1) onto the stack
// 6. Repeat until the stack is empty
//
// Failures:
// - A page that cannot be fetched is logged and skipped; the rest of the
//   crawl carries on
// - A failed download is logged and skipped too, unless the config says
//   to abort (--fail-fast)
//
// Rust concepts:
// - HashSet: To track visited URLs (insert() tells us if it was new)
// - Vec as a stack: push/pop from the end gives depth-first order
// - &mut self: the crawler owns its visited set, no locking needed
// =============================================================================

use super::links::extract_links;
use super::report::{CrawlReport, FailureStage};
use crate::config::{CrawlConfig, DownloadErrorPolicy};
use crate::error::{CrawlError, Result};
use crate::{http, mirror};
use reqwest::Client;
use std::collections::HashSet;
use tracing::instrument::WithSubscriber;
use tracing::{error, info, warn, Dispatch};
use url::Url;

// Represents a page waiting on the crawl stack
#[derive(Debug, Clone)]
struct CrawlItem {
    url: Url,
    depth: usize, // How many hops from the seed
}

pub struct Crawler {
    config: CrawlConfig,
    client: Client,
    // Never cleared: a URL is crawled at most once per Crawler
    visited: HashSet<String>,
    logger: Dispatch,
}

impl Crawler {
    // Creates a crawler
    //
    // The logger is owned by the caller; every event the crawl emits goes
    // to it (see logging::file_dispatch).
    pub fn new(config: CrawlConfig, logger: Dispatch) -> Result<Self> {
        let client = http::build_client(config.timeout)?;

        Ok(Self {
            config,
            client,
            visited: HashSet::new(),
            logger,
        })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    // Crawls from the seed URL at depth 0
    pub async fn crawl(&mut self) -> Result<CrawlReport> {
        let seed = self.config.seed.clone();
        self.crawl_url(seed, 0).await
    }

    // Crawls from any URL at a given depth
    //
    // Returns Err only when a download fails under DownloadErrorPolicy::Abort.
    // Page fetch failures never escape; they end up in the report.
    pub async fn crawl_url(&mut self, mut url: Url, depth: usize) -> Result<CrawlReport> {
        // Visited keys never carry a fragment (links lose theirs in extract_links)
        url.set_fragment(None);
        let logger = self.logger.clone();
        self.walk(url, depth).with_subscriber(logger).await
    }

    async fn walk(&mut self, start: Url, start_depth: usize) -> Result<CrawlReport> {
        let mirror_root = self.config.mirror_root();
        let mut report = CrawlReport::default();

        let mut stack = vec![CrawlItem {
            url: start,
            depth: start_depth,
        }];

        while let Some(item) = stack.pop() {
            // Mark as visited before fetching, so a page linking back to
            // itself (or a cycle) can never be crawled again
            if !self.visited.insert(item.url.to_string()) {
                continue;
            }

            if self.config.progress {
                println!("  Crawling [depth {}]: {}", item.depth, item.url);
            }
            info!(depth = item.depth, "Crawling {}", item.url);

            let page = match http::get_text(&self.client, &item.url).await {
                Ok(page) => page,
                Err(e) => {
                    let reason = failure_reason(&e);
                    error!("Error requesting {}: {}", item.url, reason);
                    eprintln!("  Warning: Failed to fetch {}: {}", item.url, reason);
                    report.record_failure(item.url.as_str(), FailureStage::Page, reason);
                    continue;
                }
            };

            if !page.status.is_success() {
                warn!("{} answered HTTP {}", item.url, page.status.as_u16());
            }
            report.pages_visited.push(item.url.to_string());

            let links = extract_links(&page.body, &item.url);

            for link in &links {
                match mirror::download(&self.client, link, &mirror_root).await {
                    Ok(path) => {
                        if self.config.progress {
                            println!("Downloaded {}", path.display());
                        }
                        report.downloaded.push(path);
                    }
                    Err(e) => match self.config.on_download_error {
                        DownloadErrorPolicy::Abort => return Err(e),
                        DownloadErrorPolicy::Continue => {
                            let reason = failure_reason(&e);
                            error!("Error downloading {}: {}", link, reason);
                            eprintln!("  Warning: Failed to download {}: {}", link, reason);
                            report.record_failure(link.as_str(), FailureStage::Download, reason);
                        }
                    },
                }
            }

            if item.depth < self.config.max_depth {
                // Reversed so the first link on the page is popped first
                stack.extend(links.into_iter().rev().map(|url| CrawlItem {
                    url,
                    depth: item.depth + 1,
                }));
            }
        }

        Ok(report)
    }
}

fn failure_reason(err: &CrawlError) -> String {
    match err {
        CrawlError::Transport { source, .. } => {
            format!("{}: {}", http::describe_transport_error(source), source)
        }
        other => other.to_string(),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a stack instead of recursion?
//    - A recursive async fn needs boxing, and deep link chains could
//      overflow the call stack
//    - A Vec used as a stack gives the same depth-first order:
//      push the children, pop the most recent one next
//
// 2. Why does HashSet::insert return a bool?
//    - true = the value was new, false = it was already there
//    - So "check if visited, then mark visited" is one call
//
// 3. What does .with_subscriber(logger) do?
//    - Every tracing event inside the future goes to `logger`
//    - Nothing is installed globally, so tests can each use their own log
//
// 4. Why are downloads not deduplicated?
//    - Only crawling is deduplicated
//    - A file linked from two pages is downloaded twice and the second copy
//      gets a _1 suffix
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn mount_page(server: &MockServer, route: &str, body: &str, expected_hits: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string(body),
            )
            .expect(expected_hits)
            .mount(server)
            .await;
    }

    fn test_crawler(seed: &str, depth: usize, out: &Path, logger: Dispatch) -> Crawler {
        let config = CrawlConfig::new(seed)
            .unwrap()
            .with_max_depth(depth)
            .with_output_dir(out)
            .with_timeout(Duration::from_secs(5));
        Crawler::new(config, logger).unwrap()
    }

    /// Test that A -> B -> A terminates and visits each page once
    #[tokio::test]
    async fn test_cycle_visits_each_page_once() {
        let mock_server = MockServer::start().await;
        // Each page: one crawl fetch + one download from the other page
        mount_page(&mock_server, "/", r#"<a href="/b">B</a>"#, 2).await;
        mount_page(&mock_server, "/b", r#"<a href="/">A</a>"#, 2).await;

        let out = TempDir::new().unwrap();
        let seed = format!("{}/", mock_server.uri());
        let mut crawler = test_crawler(&seed, 10, out.path(), Dispatch::none());

        let report = crawler.crawl().await.unwrap();

        assert_eq!(crawler.visited().len(), 2);
        assert_eq!(
            report.pages_visited,
            vec![seed.clone(), format!("{}/b", mock_server.uri())]
        );
        assert!(report.is_clean());
    }

    /// A seed with a fragment is the same page as a link back to it
    #[tokio::test]
    async fn test_seed_fragment_does_not_split_visited_key() {
        let mock_server = MockServer::start().await;
        // One crawl fetch + one download of the link back to "/"
        mount_page(&mock_server, "/", r#"<a href="/">Home</a>"#, 2).await;

        let out = TempDir::new().unwrap();
        let seed = format!("{}/#top", mock_server.uri());
        let mut crawler = test_crawler(&seed, 3, out.path(), Dispatch::none());

        let report = crawler.crawl().await.unwrap();

        assert_eq!(report.pages_visited, vec![format!("{}/", mock_server.uri())]);
        assert_eq!(crawler.visited().len(), 1);
    }

    /// crawl_url normalizes its start URL the same way
    #[tokio::test]
    async fn test_crawl_url_drops_fragment() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", "<p>no links</p>", 1).await;

        let out = TempDir::new().unwrap();
        let seed = format!("{}/", mock_server.uri());
        let mut crawler = test_crawler(&seed, 1, out.path(), Dispatch::none());

        crawler.crawl().await.unwrap();
        let again = Url::parse(&format!("{}/#section", mock_server.uri())).unwrap();
        let report = crawler.crawl_url(again, 0).await.unwrap();

        assert!(report.pages_visited.is_empty());
    }

    /// A file saved as /blog does not block /blog/post.html
    #[tokio::test]
    async fn test_file_then_directory_with_same_name() {
        let mock_server = MockServer::start().await;
        mount_page(
            &mock_server,
            "/",
            r#"<a href="/blog">Blog</a> <a href="/blog/post.html">Post</a>"#,
            1,
        )
        .await;
        mount_page(&mock_server, "/blog", "<p>blog index</p>", 1).await;
        mount_page(&mock_server, "/blog/post.html", "<p>post</p>", 1).await;

        let out = TempDir::new().unwrap();
        let seed = format!("{}/", mock_server.uri());
        let mut crawler = test_crawler(&seed, 0, out.path(), Dispatch::none());

        let report = crawler.crawl().await.unwrap();

        assert!(report.is_clean(), "failures: {:?}", report.failures);
        let mirror_root = out.path().join("127.0.0.1");
        assert!(mirror_root.join("blog").is_file());
        assert_eq!(
            std::fs::read_to_string(mirror_root.join("blog_1").join("post.html")).unwrap(),
            "<p>post</p>"
        );
    }

    /// Depth 0 downloads the seed's links but never crawls them
    #[tokio::test]
    async fn test_depth_zero_only_downloads() {
        let mock_server = MockServer::start().await;
        mount_page(
            &mock_server,
            "/index.html",
            r#"<a href="/docs/readme.txt">Readme</a> <a href="/next.html">Next</a>"#,
            1,
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/docs/readme.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .expect(1)
            .mount(&mock_server)
            .await;
        // Downloaded once, never crawled, so its link is never requested
        mount_page(&mock_server, "/next.html", r#"<a href="/deeper.html">x</a>"#, 1).await;
        mount_page(&mock_server, "/deeper.html", "", 0).await;

        let out = TempDir::new().unwrap();
        let seed = format!("{}/index.html", mock_server.uri());
        let mut crawler = test_crawler(&seed, 0, out.path(), Dispatch::none());

        let report = crawler.crawl().await.unwrap();

        assert_eq!(report.pages_visited, vec![seed]);
        assert_eq!(crawler.visited().len(), 1);

        let mirror_root = out.path().join("127.0.0.1");
        let readme = mirror_root.join("docs").join("readme.txt");
        assert_eq!(std::fs::read_to_string(&readme).unwrap(), "hello");
        assert!(mirror_root.join("next.html").exists());
        assert_eq!(report.downloaded.len(), 2);
    }

    /// A chain p0 -> p1 -> p2 -> p3 -> p4 with depth 2 crawls p0..p2 only
    #[tokio::test]
    async fn test_depth_limit_on_chain() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/p0", r#"<a href="/p1">1</a>"#, 1).await;
        mount_page(&mock_server, "/p1", r#"<a href="/p2">2</a>"#, 2).await;
        mount_page(&mock_server, "/p2", r#"<a href="/p3">3</a>"#, 2).await;
        // p3 is only downloaded (from p2), never crawled
        mount_page(&mock_server, "/p3", r#"<a href="/p4">4</a>"#, 1).await;
        mount_page(&mock_server, "/p4", "", 0).await;

        let out = TempDir::new().unwrap();
        let seed = format!("{}/p0", mock_server.uri());
        let mut crawler = test_crawler(&seed, 2, out.path(), Dispatch::none());

        let report = crawler.crawl().await.unwrap();

        let expected: Vec<String> = ["/p0", "/p1", "/p2"]
            .iter()
            .map(|p| format!("{}{}", mock_server.uri(), p))
            .collect();
        assert_eq!(report.pages_visited, expected);
        assert!(!crawler.visited().contains(&format!("{}/p3", mock_server.uri())));
    }

    /// An unreachable link is logged and the rest of the crawl completes
    #[tokio::test]
    async fn test_unreachable_link_is_logged_not_fatal() {
        let mock_server = MockServer::start().await;
        mount_page(
            &mock_server,
            "/",
            r#"<a href="http://127.0.0.1:1/dead.html">Dead</a> <a href="/ok.html">Ok</a>"#,
            1,
        )
        .await;
        mount_page(&mock_server, "/ok.html", "<p>fine</p>", 2).await;

        let out = TempDir::new().unwrap();
        let log_path = out.path().join("requiem.log");
        let logger = logging::file_dispatch(&log_path).unwrap();
        let seed = format!("{}/", mock_server.uri());
        let mut crawler = test_crawler(&seed, 1, out.path(), logger);

        let report = crawler.crawl().await.unwrap();

        assert!(report
            .pages_visited
            .contains(&format!("{}/ok.html", mock_server.uri())));

        let stages: Vec<FailureStage> = report
            .failures
            .iter()
            .filter(|f| f.url == "http://127.0.0.1:1/dead.html")
            .map(|f| f.stage)
            .collect();
        assert_eq!(stages, vec![FailureStage::Download, FailureStage::Page]);

        let log = std::fs::read_to_string(&log_path).unwrap();
        assert!(log.contains("Error requesting http://127.0.0.1:1/dead.html"));
    }

    /// With --fail-fast a failed download ends the crawl with an error
    #[tokio::test]
    async fn test_fail_fast_aborts_on_download_error() {
        let mock_server = MockServer::start().await;
        mount_page(
            &mock_server,
            "/",
            r#"<a href="http://127.0.0.1:1/dead.zip">Dead</a> <a href="/later.html">Later</a>"#,
            1,
        )
        .await;
        mount_page(&mock_server, "/later.html", "", 0).await;

        let out = TempDir::new().unwrap();
        let config = CrawlConfig::new(&format!("{}/", mock_server.uri()))
            .unwrap()
            .with_output_dir(out.path())
            .with_timeout(Duration::from_secs(5))
            .with_download_error_policy(DownloadErrorPolicy::Abort);
        let mut crawler = Crawler::new(config, Dispatch::none()).unwrap();

        let err = crawler.crawl().await.unwrap_err();
        assert!(matches!(err, CrawlError::Transport { .. }));
    }

    /// A file linked from two pages is written twice, the second with _1
    #[tokio::test]
    async fn test_shared_file_is_downloaded_per_link() {
        let mock_server = MockServer::start().await;
        mount_page(
            &mock_server,
            "/",
            r#"<a href="/shared.txt">S</a> <a href="/other.html">O</a>"#,
            1,
        )
        .await;
        mount_page(&mock_server, "/other.html", r#"<a href="/shared.txt">S</a>"#, 2).await;
        Mock::given(method("GET"))
            .and(path("/shared.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("same"))
            .mount(&mock_server)
            .await;

        let out = TempDir::new().unwrap();
        let seed = format!("{}/", mock_server.uri());
        let mut crawler = test_crawler(&seed, 1, out.path(), Dispatch::none());

        crawler.crawl().await.unwrap();

        let mirror_root = out.path().join("127.0.0.1");
        assert!(mirror_root.join("shared.txt").exists());
        assert!(mirror_root.join("shared.txt_1").exists());
    }

    /// The visited set outlives a single crawl call
    #[tokio::test]
    async fn test_second_crawl_skips_visited_seed() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", "<p>no links</p>", 1).await;

        let out = TempDir::new().unwrap();
        let seed = format!("{}/", mock_server.uri());
        let mut crawler = test_crawler(&seed, 1, out.path(), Dispatch::none());

        let first = crawler.crawl().await.unwrap();
        let second = crawler.crawl().await.unwrap();

        assert_eq!(first.pages_visited.len(), 1);
        assert!(second.pages_visited.is_empty());
    }
}
