//! Resolve a resource name that is either a local path or a URL to a local path.
//!
//! URL detection is a plain, case-sensitive prefix match; anything that does
//! not start with a known scheme is treated as a local path, even when it is a
//! malformed URL.

use std::path::Path;

use crate::download;
use crate::error::Error;
use crate::scope::{self, ScopedPath};
use crate::temp::TempFileOptions;

/// Scheme prefixes that mark a resource name as a URL.
pub const URL_SCHEMES: &[&str] = &["http://", "https://", "ftp://", "file://", "file:\\"];

/// Returns true if `name` starts with one of [`URL_SCHEMES`].
pub fn is_url(name: &str) -> bool {
    URL_SCHEMES.iter().any(|scheme| name.starts_with(scheme))
}

/// Classification of a resource name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    /// Remote resource, fetched into a temp file.
    Url(&'a str),
    /// Caller-owned local file, used as-is.
    Local(&'a Path),
}

impl<'a> Resource<'a> {
    pub fn classify(name: &'a str) -> Self {
        if is_url(name) {
            Resource::Url(name)
        } else {
            Resource::Local(Path::new(name))
        }
    }
}

/// Yields a local path for `name`.
///
/// URLs are downloaded like [`download::download`] and deleted on release.
/// Local paths are returned unchanged and never deleted; they are not checked
/// for existence.
pub fn local_file(name: &str, options: &TempFileOptions) -> Result<ScopedPath, Error> {
    match Resource::classify(name) {
        Resource::Url(url) => download::download(url, options),
        Resource::Local(path) => {
            tracing::debug!(path = %path.display(), "using local file as-is");
            Ok(ScopedPath::pass_through(path.to_path_buf()))
        }
    }
}

/// Runs `body` with a local path for `name`, cleaning up any download afterwards.
pub fn with_local_file<T, E, F>(name: &str, options: &TempFileOptions, body: F) -> Result<T, E>
where
    F: FnOnce(&Path) -> Result<T, E>,
    E: From<Error>,
{
    let scoped = local_file(name, options)?;
    scope::run(scoped, body)
}
