//! Error types for scoped acquisition and release.

use std::io;
use std::path::PathBuf;

/// Why a fetch into a temp file failed. Kept separate from [`Error`] so callers
/// can tell transport failures from HTTP statuses and local write failures.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, timeout, unsupported scheme, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the body to the temp file failed (e.g. disk full).
    #[error("storage: {0}")]
    Storage(#[source] io::Error),
}

/// Errors surfaced by the scoped-resource factories.
///
/// Acquisition errors (`Allocate`, `Fetch`) are returned before any scope body
/// runs. `Release` only comes out of an explicit [`ScopedPath::close`];
/// release on drop logs instead.
///
/// [`ScopedPath::close`]: crate::ScopedPath::close
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The temp file could not be created (permissions, disk full, missing dir).
    #[error("failed to allocate temp file: {0}")]
    Allocate(#[source] io::Error),
    /// Fetching `url` failed; no temp file is left behind.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    /// Removing an owned file failed for a reason other than it being gone.
    #[error("failed to remove {}: {source}", path.display())]
    Release {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn fetch(url: &str, source: FetchError) -> Self {
        Error::Fetch {
            url: url.to_string(),
            source,
        }
    }

    /// HTTP status if this is a fetch that got a non-2xx response.
    pub fn http_status(&self) -> Option<u32> {
        match self {
            Error::Fetch {
                source: FetchError::Http(code),
                ..
            } => Some(*code),
            _ => None,
        }
    }
}
