//! Feed configuration (`update-feed.toml`)

use crate::feed::{Assembler, IconLocator, NonceIssuer};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE: &str = "update-feed.toml";

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8089
}

fn default_endpoints_dir() -> PathBuf {
    PathBuf::from("endpoints")
}

fn default_nonce_secret() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_nonce_lifetime() -> u64 {
    86400
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Update feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Address the HTTP surface listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Root of the endpoint document store
    #[serde(default = "default_endpoints_dir")]
    pub endpoints_dir: PathBuf,

    /// Directory holding per-plugin asset folders (`<slug>/images/icon-*.png`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins_dir: Option<PathBuf>,

    /// Public URL that `plugins_dir` is served under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins_url: Option<String>,

    /// Secret mixed into request nonces
    #[serde(default = "default_nonce_secret")]
    pub nonce_secret: String,

    /// How long an issued nonce stays valid, in seconds
    #[serde(default = "default_nonce_lifetime")]
    pub nonce_lifetime_secs: u64,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            endpoints_dir: default_endpoints_dir(),
            plugins_dir: None,
            plugins_url: None,
            nonce_secret: default_nonce_secret(),
            nonce_lifetime_secs: default_nonce_lifetime(),
            log_filter: default_log_filter(),
        }
    }
}

impl FeedConfig {
    /// Load config from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: FeedConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to `path`
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `bind:port` for the listener
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn nonce_issuer(&self) -> NonceIssuer {
        NonceIssuer::new(self.nonce_secret.clone(), self.nonce_lifetime_secs)
    }

    /// Record assembler, with the icon locator when plugin assets are configured
    pub fn assembler(&self) -> Assembler {
        match (&self.plugins_dir, &self.plugins_url) {
            (Some(dir), Some(url)) => Assembler::new().with_icons(IconLocator::new(dir, url.clone())),
            _ => Assembler::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = FeedConfig::load(&temp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.address(), "127.0.0.1:8089");
        assert_eq!(config.endpoints_dir, PathBuf::from("endpoints"));
        assert_eq!(config.nonce_lifetime_secs, 86400);
        assert!(!config.nonce_secret.is_empty());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "port = 9000\nnonce_secret = \"s3cret\"\n").unwrap();

        let config = FeedConfig::load(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.nonce_secret, "s3cret");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conf/feed.toml");
        let config = FeedConfig {
            plugins_dir: Some(PathBuf::from("/srv/plugins")),
            plugins_url: Some("https://cdn.example/plugins".to_string()),
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = FeedConfig::load(&path).unwrap();
        assert_eq!(loaded.nonce_secret, config.nonce_secret);
        assert_eq!(loaded.plugins_url.as_deref(), Some("https://cdn.example/plugins"));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "port = \"not a number\"").unwrap();
        assert!(FeedConfig::load(&path).is_err());
    }
}
