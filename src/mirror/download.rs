// src/mirror/download.rs
// =============================================================================
// Downloads one linked resource into the mirror.
//
// Steps:
// 1. GET the resource (second request; the crawler does not share bodies)
// 2. Work out <mirror root>/<url dirs>/<basename> and create the directories
//    (a file already sitting on a directory name pushes it to name_1, ...)
// 3. Claim a free file name (name, name_1, ...) and write the body verbatim
//
// The body is fetched BEFORE a file is claimed, so a failed request leaves
// nothing behind. A failure halfway through the write leaves a truncated
// file; there is no rollback.
// =============================================================================

use super::path::{allocate_file, create_dirs, mirror_path};
use crate::error::{CrawlError, Result};
use crate::http;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use url::Url;

// Downloads `url` under `mirror_root` and returns where the file was written
pub async fn download(client: &Client, url: &Url, mirror_root: &Path) -> Result<PathBuf> {
    let fetched = http::get_bytes(client, url).await?;
    if !fetched.status.is_success() {
        // Kept anyway: the mirror stores whatever the server sent
        warn!("{} answered HTTP {}", url, fetched.status.as_u16());
    }

    let target = mirror_path(mirror_root, url);
    let dir = create_dirs(&target).await?;

    let (mut file, file_path) = allocate_file(&dir, &target.file_name).await?;
    file.write_all(fetched.body.as_ref())
        .await
        .map_err(|e| CrawlError::filesystem(&file_path, e))?;
    file.flush()
        .await
        .map_err(|e| CrawlError::filesystem(&file_path, e))?;

    info!("Downloaded {} -> {}", url, file_path.display());
    Ok(file_path)
}
