//! RAII guard that removes an owned file when dropped.

use std::fmt;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// How the file behind a [`ScopedPath`] came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Fresh empty temp file.
    Ephemeral,
    /// Temp file filled from a URL.
    Downloaded,
    /// Caller-owned local path, never created or removed here.
    PassThrough,
}

impl Origin {
    /// True if the guard deletes the file on release.
    pub fn owns_file(self) -> bool {
        matches!(self, Origin::Ephemeral | Origin::Downloaded)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Ephemeral => write!(f, "ephemeral"),
            Origin::Downloaded => write!(f, "downloaded"),
            Origin::PassThrough => write!(f, "pass-through"),
        }
    }
}

/// A local path valid for the lifetime of the guard.
///
/// Owned paths (`Ephemeral`, `Downloaded`) are removed exactly once: by
/// [`close`](Self::close) or on drop, including during a panic unwind. A file
/// that is already gone counts as released.
#[derive(Debug)]
pub struct ScopedPath {
    path: PathBuf,
    origin: Origin,
    released: bool,
}

impl ScopedPath {
    pub(crate) fn owned(path: PathBuf, origin: Origin) -> Self {
        debug_assert!(origin.owns_file());
        Self {
            path,
            origin,
            released: false,
        }
    }

    pub(crate) fn pass_through(path: PathBuf) -> Self {
        Self {
            path,
            origin: Origin::PassThrough,
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Release now and report removal errors instead of logging them.
    pub fn close(mut self) -> Result<(), Error> {
        self.release().map_err(|source| Error::Release {
            path: self.path.clone(),
            source,
        })
    }

    fn release(&mut self) -> io::Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        if !self.origin.owns_file() {
            return Ok(());
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), origin = %self.origin, "removed scoped file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "scoped file already gone");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

impl Drop for ScopedPath {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!(path = %self.path.display(), "failed to remove scoped file: {}", e);
        }
    }
}

impl Deref for ScopedPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.path
    }
}

impl AsRef<Path> for ScopedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Runs `body` with the guard's path, then releases the guard.
///
/// The body's result is returned as-is; release problems are logged and never
/// replace it.
pub fn run<T, E, F>(scoped: ScopedPath, body: F) -> Result<T, E>
where
    F: FnOnce(&Path) -> Result<T, E>,
{
    let result = body(scoped.path());
    drop(scoped);
    result
}
