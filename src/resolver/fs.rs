//! Serving files and directory listings from a local directory.

use std::path::{Component, Path, PathBuf};

use tokio::fs::{self, File};

use crate::error::{Error, Result};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::resolver::Resolve;

/// Request paths that normalize to nothing refer to the root directory.
pub const CURRENT_DIR: &str = ".";

/// Resolves request paths against a root directory.
///
/// A path that cannot be looked up, for whatever reason, gets the 404 page.
/// A directory gets an HTML listing and anything else is sent as a file
/// download.
#[derive(Debug, Clone)]
pub struct FsResolver {
    root: PathBuf,
}

/// Trims leading and trailing `/` from a request path.
///
/// # Example
///
/// ```
/// # use fileserve::resolver::fs::normalize_request_path;
/// assert_eq!(normalize_request_path("/docs/"), "docs");
/// assert_eq!(normalize_request_path("/"), ".");
/// ```
pub fn normalize_request_path(path: &str) -> &str {
    match path.trim_matches('/') {
        "" => CURRENT_DIR,
        trimmed => trimmed,
    }
}

impl FsResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a normalized request path onto the filesystem.
    ///
    /// Returns `None` when `..` components would leave the root.
    pub fn local_path(&self, normalized: &str) -> Option<PathBuf> {
        let mut parts: Vec<&str> = Vec::new();

        for component in Path::new(normalized).components() {
            match component {
                Component::Normal(part) => parts.push(part.to_str()?),
                Component::ParentDir => {
                    parts.pop()?;
                }
                Component::CurDir => {}
                Component::RootDir | Component::Prefix(_) => return None,
            }
        }

        Some(parts.iter().fold(self.root.clone(), |path, part| path.join(part)))
    }

    async fn stat(&self, normalized: &str) -> Result<(PathBuf, std::fs::Metadata)> {
        let path = self
            .local_path(normalized)
            .ok_or_else(|| Error::NotFound(PathBuf::from(normalized)))?;

        match fs::metadata(&path).await {
            Ok(meta) => Ok((path, meta)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Lookup failed");
                Err(Error::NotFound(path))
            }
        }
    }

    async fn file_response(&self, path: &Path) -> Result<Response> {
        let file = File::open(path).await?;
        let len = file.metadata().await?.len();
        Ok(Response::file(file, len))
    }
}

impl Resolve for FsResolver {
    async fn resolve(&self, request: &Request) -> Result<Response> {
        let normalized = normalize_request_path(&request.path);

        let (path, meta) = match self.stat(normalized).await {
            Ok(found) => found,
            Err(Error::NotFound(_)) => return Ok(Response::not_found()),
            Err(e) => return Err(e),
        };

        if meta.is_dir() {
            let entries = list_directory(&path).await;
            Ok(Response::directory_listing(normalized, &entries))
        } else {
            self.file_response(&path).await
        }
    }
}

/// Returns the names in `dir`, sorted.
///
/// An unreadable directory lists as empty; an error part way through keeps
/// the entries read so far.
pub async fn list_directory(dir: &Path) -> Vec<String> {
    let mut names = Vec::new();

    let mut read_dir = match fs::read_dir(dir).await {
        Ok(read_dir) => read_dir,
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "Cannot list directory");
            return names;
        }
    };

    loop {
        match read_dir.next_entry().await {
            Ok(Some(entry)) => names.push(entry.file_name().to_string_lossy().into_owned()),
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(path = %dir.display(), error = %e, "Directory listing cut short");
                break;
            }
        }
    }

    names.sort();
    names
}
