use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PasteError, PasteResult};

pub const DEFAULT_API_ENDPOINT: &str = "https://api.paste.me/api/paste/new";
pub const DEFAULT_SHARE_URL_PREFIX: &str = "https://paste.me";

/// Top-level client configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PasteConfig {
    pub api: ApiConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// URL the paste document is POSTed to
    pub endpoint: String,
    /// Base of the share URL printed on success (`<prefix>/paste/<uuid>#<passphrase>`)
    pub share_url_prefix: String,
    /// User-Agent header sent with the request
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: warn)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_ENDPOINT.into(),
            share_url_prefix: DEFAULT_SHARE_URL_PREFIX.into(),
            user_agent: concat!("pasteme/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "text".into(),
        }
    }
}

impl ApiConfig {
    /// Reject URLs that are not http(s); warn when the transport is plaintext.
    pub fn validate(&self) -> PasteResult<()> {
        for (key, url) in [
            ("api.endpoint", &self.endpoint),
            ("api.share_url_prefix", &self.share_url_prefix),
        ] {
            if url.starts_with("http://") {
                tracing::warn!(key, url = %url, "plaintext http URL configured");
            } else if !url.starts_with("https://") {
                return Err(PasteError::Config(format!(
                    "{key} must be an http(s) URL, got: {url:?}"
                )));
            }
        }
        Ok(())
    }

    /// `<prefix>/paste/<uuid>#<fragment>`
    pub fn share_url(&self, uuid: &str, fragment: &str) -> String {
        format!(
            "{}/paste/{}#{}",
            self.share_url_prefix.trim_end_matches('/'),
            uuid,
            fragment
        )
    }
}

impl PasteConfig {
    /// Load from a TOML file; a missing file yields the defaults.
    pub fn load(path: &Path) -> PasteResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| PasteError::Config(format!("reading {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| PasteError::Config(format!("parsing {}: {e}", path.display())))
    }
}

/// Expand `~` in path to the user's home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    match s.strip_prefix("~/") {
        Some(rest) => {
            let home = std::env::var("HOME").unwrap_or_default();
            PathBuf::from(home).join(rest)
        }
        None => path.to_path_buf(),
    }
}
