//! Scoped downloads: fetch a URL into a temp file that lives for one scope.
//!
//! The body is fetched with a single blocking GET on the calling thread and
//! written sequentially to the temp file. libcurl handles http, https, ftp and
//! file URLs alike.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::config::DownloadConfig;
use crate::error::{Error, FetchError};
use crate::scope::{self, Origin, ScopedPath};
use crate::temp::{self, TempFileOptions};
use crate::url_model::extension_from_url;

/// Fetches `url` and writes the body to `file`. Returns the number of bytes written.
///
/// Non-2xx HTTP responses are errors. Protocols without a status code (file)
/// report 0 and are accepted; FTP completion codes are 2xx.
pub fn fetch_into(url: &str, file: &mut File, cfg: &DownloadConfig) -> Result<u64, FetchError> {
    let mut written = 0u64;
    let mut write_error: Option<io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(cfg.follow_redirects)?;
    if cfg.follow_redirects {
        easy.max_redirections(cfg.max_redirections)?;
    }
    easy.connect_timeout(cfg.connect_timeout())?;
    if let Some(timeout) = cfg.timeout() {
        easy.timeout(timeout)?;
    }
    if let Some(agent) = &cfg.user_agent {
        easy.useragent(agent)?;
    }

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                tracing::warn!("download write failed: {}", e);
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(FetchError::Storage(e));
    }
    performed?;

    let code = easy.response_code()?;
    if code != 0 && !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    file.flush().map_err(FetchError::Storage)?;
    Ok(written)
}

/// Downloads `url` into a temp file with default transfer settings.
///
/// `options` are forwarded to the temp-file allocator, except `suffix`, which
/// is always replaced by the URL's extension.
pub fn download(url: &str, options: &TempFileOptions) -> Result<ScopedPath, Error> {
    download_with(url, options, &DownloadConfig::default())
}

/// Like [`download`] with explicit transfer settings.
pub fn download_with(
    url: &str,
    options: &TempFileOptions,
    cfg: &DownloadConfig,
) -> Result<ScopedPath, Error> {
    let options = TempFileOptions {
        suffix: extension_from_url(url),
        ..options.clone()
    };
    // On any failure below, dropping `file` removes the partial download.
    let mut file = temp::allocate(&options)?;
    let bytes = fetch_into(url, file.as_file_mut(), cfg).map_err(|e| Error::fetch(url, e))?;
    tracing::info!(url, bytes, path = %file.path().display(), "downloaded to temp file");
    temp::into_scoped(file, Origin::Downloaded)
}

/// Runs `body` with the local path of the downloaded `url` and deletes the file
/// before returning. Fetch errors are returned before `body` runs.
pub fn with_download<T, E, F>(url: &str, options: &TempFileOptions, body: F) -> Result<T, E>
where
    F: FnOnce(&Path) -> Result<T, E>,
    E: From<Error>,
{
    let scoped = download(url, options)?;
    scope::run(scoped, body)
}
