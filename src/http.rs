// src/http.rs
// =============================================================================
// This module does all of our HTTP work.
//
// Key functionality:
// - Builds one reqwest Client that is reused for every request
// - GET a page as text (for link extraction)
// - GET a resource as raw bytes (for downloading)
// - Labels transport errors (timeout, DNS, connection) for the log
//
// Requests are plain GETs: no custom headers, no cookies, no auth.
//
// Rust concepts:
// - async/await: reqwest's client is async, we await each request in turn
// - Result<T, E>: every request can fail, the caller decides what to do
// =============================================================================

use crate::error::{CrawlError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

// A fetched body together with the status it came with
#[derive(Debug)]
pub struct Fetched<T> {
    pub status: StatusCode,
    pub body: T,
}

// Builds the HTTP client used for the whole crawl
//
// Client keeps a connection pool internally, so reusing it across the
// crawl avoids reconnecting to the same host for every page.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(CrawlError::Client)
}

// Fetches a page and returns its body as text
//
// A non-2xx status is NOT an error here: error pages still have a body,
// and the caller scans whatever came back.
pub async fn get_text(client: &Client, url: &Url) -> Result<Fetched<String>> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| CrawlError::transport(url.as_str(), e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CrawlError::transport(url.as_str(), e))?;

    Ok(Fetched { status, body })
}

// Fetches a resource and returns its body verbatim
//
// The body is reqwest's own buffer, handed over without copying.
pub async fn get_bytes(client: &Client, url: &Url) -> Result<Fetched<impl AsRef<[u8]>>> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| CrawlError::transport(url.as_str(), e))?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| CrawlError::transport(url.as_str(), e))?;

    Ok(Fetched { status, body })
}

// Gives a short human-readable label for a failed request
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - Connection refused / host unreachable
// - Body decoding problems
pub fn describe_transport_error(error: &reqwest::Error) -> &'static str {
    let error_string = error.to_string().to_lowercase();

    if error.is_timeout() {
        "timed out"
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if error_string.contains("dns") {
            "could not resolve hostname"
        } else {
            "connection failed"
        }
    } else if error.is_body() || error.is_decode() {
        "failed to read response body"
    } else {
        "request failed"
    }
}
