use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::temp::{TempFileOptions, DEFAULT_PREFIX};

/// Transfer settings for downloads (optional `[download]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Overall transfer timeout in seconds (None = wait for the whole body).
    pub timeout_secs: Option<u64>,
    /// Follow HTTP redirects.
    pub follow_redirects: bool,
    /// Maximum number of redirects to follow when `follow_redirects` is set.
    pub max_redirections: u32,
    /// Custom User-Agent header (None = libcurl default).
    pub user_agent: Option<String>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: None,
            follow_redirects: true,
            max_redirections: 10,
            user_agent: None,
        }
    }
}

impl DownloadConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Global configuration loaded from `~/.config/fullcontext/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullContextConfig {
    /// Directory for temp files (None = system temp dir).
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    /// Temp file name prefix (None = "tmp").
    #[serde(default)]
    pub prefix: Option<String>,
    /// Download transfer settings; built-in defaults when missing.
    #[serde(default)]
    pub download: DownloadConfig,
}

impl FullContextConfig {
    /// Temp-file options derived from this config, with an empty suffix.
    pub fn temp_file_options(&self) -> TempFileOptions {
        TempFileOptions {
            suffix: String::new(),
            prefix: self
                .prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            dir: self.temp_dir.clone(),
        }
    }
}

/// Path of `config.toml` in the XDG config dir. Creates the parent directory.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fullcontext")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Parse configuration from a TOML file.
pub fn load_from(path: &Path) -> Result<FullContextConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FullContextConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from the XDG config dir, or defaults if no file exists.
/// Never writes to disk.
pub fn load() -> Result<FullContextConfig> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fullcontext")?;
    match xdg_dirs.find_config_file("config.toml") {
        Some(path) => load_from(&path),
        None => {
            tracing::debug!("no config.toml found, using defaults");
            Ok(FullContextConfig::default())
        }
    }
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FullContextConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FullContextConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FullContextConfig::default();
        assert!(cfg.temp_dir.is_none());
        assert!(cfg.prefix.is_none());
        assert_eq!(cfg.download.connect_timeout_secs, 15);
        assert_eq!(cfg.download.timeout(), None);
        assert!(cfg.download.follow_redirects);
        assert_eq!(cfg.download.max_redirections, 10);
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut cfg = FullContextConfig::default();
        cfg.prefix = Some("fc-".to_string());
        cfg.download.timeout_secs = Some(60);
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FullContextConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_download_section() {
        let toml = r#"
            temp_dir = "/var/tmp"

            [download]
            timeout_secs = 30
            user_agent = "fullcontext-test"
        "#;
        let cfg: FullContextConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.temp_dir.as_deref(), Some(Path::new("/var/tmp")));
        assert_eq!(cfg.download.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(cfg.download.user_agent.as_deref(), Some("fullcontext-test"));
        // Unset fields keep their defaults.
        assert_eq!(cfg.download.connect_timeout_secs, 15);
        assert!(cfg.download.follow_redirects);
    }

    #[test]
    fn empty_config_is_default() {
        let cfg: FullContextConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, FullContextConfig::default());
    }

    #[test]
    fn temp_file_options_from_config() {
        let cfg = FullContextConfig {
            temp_dir: Some(PathBuf::from("/scratch")),
            prefix: Some("job-".to_string()),
            download: DownloadConfig::default(),
        };
        let opts = cfg.temp_file_options();
        assert_eq!(opts.prefix, "job-");
        assert_eq!(opts.dir.as_deref(), Some(Path::new("/scratch")));
        assert!(opts.suffix.is_empty());
        assert_eq!(FullContextConfig::default().temp_file_options(), TempFileOptions::default());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "prefix = \"x-\"\n[download]\nmax_redirections = 3\n").unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.prefix.as_deref(), Some("x-"));
        assert_eq!(cfg.download.max_redirections, 3);
    }

    #[test]
    fn load_from_invalid_toml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "prefix = [").unwrap();
        assert!(load_from(&path).is_err());
    }
}
