// src/mirror/path.rs
// =============================================================================
// Turns URLs into local file paths inside the mirror directory.
//
//   http://example.com/docs/guide/intro.html
//     -> <mirror root>/docs/guide/intro.html
//
// The mirror root is already named after the seed's host (example.com), so
// only the URL's path matters here.
//
// Collisions get a numeric suffix, for files AND directories:
// - intro.html exists          -> intro.html_1, intro.html_2, ...
// - a FILE called docs exists   -> the directory becomes docs_1, docs_2, ...
// - a DIRECTORY called docs sits where a file should go -> docs_1, ...
//
// Rust concepts:
// - tokio::fs: async versions of std::fs, so the runtime is never blocked
// - ErrorKind::AlreadyExists: lets "check and create" be one call
// =============================================================================

use crate::error::{CrawlError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use url::Url;

// Used when the URL path ends in '/' (or is empty) and has no basename
pub const DEFAULT_FILE_NAME: &str = "index.html";

// Where a URL lands on disk, before collision handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPath {
    pub root: PathBuf,
    pub dirs: Vec<String>,
    pub file_name: String,
}

// Splits the URL path into directory segments and a basename
//
// Empty segments ("//", trailing '/') are dropped. The url crate has already
// resolved "." and ".." segments, so nothing here can climb out of the root.
pub fn mirror_path(root: &Path, url: &Url) -> MirrorPath {
    let mut segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();

    let file_name = match segments.pop() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => DEFAULT_FILE_NAME.to_string(),
    };

    let dirs = segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    MirrorPath {
        root: root.to_path_buf(),
        dirs,
        file_name,
    }
}

// name, name_1, name_2, ...
fn with_suffix(parent: &Path, name: &str, counter: usize) -> PathBuf {
    if counter == 0 {
        parent.join(name)
    } else {
        parent.join(format!("{}_{}", name, counter))
    }
}

// Creates the directory chain for `mirror` and returns the innermost directory
//
// Each segment reuses an existing directory of the same name. When a file
// already holds that name, the first free docs_N is used instead, and later
// URLs under the same path walk the same way and land in the same docs_N.
pub async fn create_dirs(mirror: &MirrorPath) -> Result<PathBuf> {
    fs::create_dir_all(&mirror.root)
        .await
        .map_err(|e| CrawlError::filesystem(&mirror.root, e))?;

    let mut dir = mirror.root.clone();
    for segment in &mirror.dirs {
        dir = claim_dir(&dir, segment).await?;
    }
    Ok(dir)
}

async fn claim_dir(parent: &Path, name: &str) -> Result<PathBuf> {
    let mut counter = 0usize;
    loop {
        let candidate = with_suffix(parent, name, counter);

        match fs::create_dir(&candidate).await {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let metadata = fs::metadata(&candidate)
                    .await
                    .map_err(|e| CrawlError::filesystem(&candidate, e))?;
                if metadata.is_dir() {
                    return Ok(candidate);
                }
                counter += 1;
            }
            Err(e) => return Err(CrawlError::filesystem(candidate, e)),
        }
    }
}

// Creates a new, empty file at the first free name: name, name_1, name_2, ...
//
// create_new fails with AlreadyExists when anything (file or directory) sits
// at the path, so checking and claiming a name is a single step.
pub async fn allocate_file(dir: &Path, file_name: &str) -> Result<(File, PathBuf)> {
    let mut counter = 0usize;
    loop {
        let candidate = with_suffix(dir, file_name, counter);

        let opened = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await;

        match opened {
            Ok(file) => return Ok((file, candidate)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => counter += 1,
            Err(e) => return Err(CrawlError::filesystem(candidate, e)),
        }
    }
}
