//! Scoped temporary files, downloads and file-or-URL resolution.
//!
//! Every helper acquires a local path, hands it to the caller and removes the
//! backing file again when the scope ends, whichever way it ends.

pub mod config;
pub mod download;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod scope;
pub mod temp;
pub mod url_model;

pub use config::{DownloadConfig, FullContextConfig};
pub use download::{download, download_with, with_download};
pub use error::{Error, FetchError};
pub use resolver::{is_url, local_file, with_local_file, Resource};
pub use scope::{Origin, ScopedPath};
pub use temp::{temporary_file, with_temporary_file, TempFileOptions};
pub use url_model::extension_from_url;
