//! Logging init for applications using this crate: file under the XDG state
//! dir, or stderr.
//!
//! Both initialisers leave an already-installed global subscriber in place.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,fullcontext=debug";

/// Writer that is either a file or stderr (used when file clone fails).
enum FileOrStderr {
    File(fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct FileMakeWriter(fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStderr::File)
            .unwrap_or(FileOrStderr::Stderr)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Path of the log file: `~/.local/state/fullcontext/fullcontext.log`.
/// Creates the parent directory.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fullcontext")?;
    xdg_dirs
        .place_state_file("fullcontext.log")
        .context("create log directory")
}

/// Initialize structured logging to [`log_file_path`].
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging() -> Result<()> {
    let log_file_path = log_file_path()?;

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .with_context(|| format!("open {}", log_file_path.display()))?;

    let writer = BoxMakeWriter::new(FileMakeWriter(file));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("fullcontext logging initialized at {}", log_file_path.display());
    }

    Ok(())
}

/// Initialize logging to stderr only (no file). Use when `init_logging()` fails.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_init_is_repeatable() {
        init_logging_stderr();
        init_logging_stderr();
        tracing::debug!("still alive");
    }

    #[test]
    fn file_or_stderr_writes_to_file() {
        use std::io::Write;
        let f = tempfile::NamedTempFile::new().unwrap();
        let mk = FileMakeWriter(f.reopen().unwrap());
        let mut w = mk.make_writer();
        w.write_all(b"line\n").unwrap();
        w.flush().unwrap();
        assert_eq!(std::fs::read(f.path()).unwrap(), b"line\n");
    }
}
