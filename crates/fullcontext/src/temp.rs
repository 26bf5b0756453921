//! Scoped temporary files.
//!
//! Allocation is delegated to the `tempfile` crate, which guarantees unique
//! names; this module only ties the resulting path to a [`ScopedPath`].

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Error;
use crate::scope::{self, Origin, ScopedPath};

/// Default name prefix, same as the platform temp-file convention.
pub const DEFAULT_PREFIX: &str = "tmp";

/// Options forwarded to the temp-file allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempFileOptions {
    /// Appended verbatim to the generated name (e.g. `".json"`). May be empty.
    pub suffix: String,
    /// Prepended to the generated name.
    pub prefix: String,
    /// Directory to create the file in; system temp dir when `None`.
    pub dir: Option<PathBuf>,
}

impl Default for TempFileOptions {
    fn default() -> Self {
        Self {
            suffix: String::new(),
            prefix: DEFAULT_PREFIX.to_string(),
            dir: None,
        }
    }
}

impl TempFileOptions {
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ..Self::default()
        }
    }

    /// Same options with `dir` set.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }
}

/// Creates a new empty temp file according to `options`. The file is removed
/// again if the returned handle is dropped before being turned into a
/// [`ScopedPath`].
pub(crate) fn allocate(options: &TempFileOptions) -> Result<NamedTempFile, Error> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(&options.prefix).suffix(&options.suffix);
    let file = match &options.dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(Error::Allocate)?;
    tracing::debug!(path = %file.path().display(), "allocated temp file");
    Ok(file)
}

/// Closes the open handle and hands the path over to a guard.
pub(crate) fn into_scoped(file: NamedTempFile, origin: Origin) -> Result<ScopedPath, Error> {
    let (handle, path) = file.keep().map_err(|e| Error::Allocate(e.error))?;
    drop(handle);
    Ok(ScopedPath::owned(path, origin))
}

/// Creates an empty, writable temp file whose name ends with
/// `options.suffix`. The file is deleted when the returned guard is released.
pub fn temporary_file(options: &TempFileOptions) -> Result<ScopedPath, Error> {
    let file = allocate(options)?;
    into_scoped(file, Origin::Ephemeral)
}

/// Runs `body` with the path of a fresh temp file and deletes the file before
/// returning, whether `body` succeeded or not.
pub fn with_temporary_file<T, E, F>(options: &TempFileOptions, body: F) -> Result<T, E>
where
    F: FnOnce(&Path) -> Result<T, E>,
    E: From<Error>,
{
    let scoped = temporary_file(options)?;
    scope::run(scoped, body)
}
