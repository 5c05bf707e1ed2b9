//! src/config/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! Manages all user-editable settings for the admin console. Loads and saves
//! settings as TOML from the cross-platform config path using the
//! [`directories`](https://docs.rs/directories) crate.
//!
//! ## Features
//! - XDG-compliant config discovery and writing (Linux, macOS, Windows)
//! - Robust defaulting if no config file exists
//! - Async load/save for smooth integration with Tokio

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration struct for the console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the knowledge-base REST collaborator.
    pub base_url: String,
    /// Entries shown per page.
    pub page_size: usize,
    /// Quiescence window before a search input is issued.
    #[serde(with = "humantime_serde")]
    pub debounce: Duration,
    /// Per-request timeout for the HTTP client.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: "http://localhost:8000/documents".to_string(),
            page_size: 10,
            debounce: Duration::from_millis(300),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    /// Loads config from TOML at the XDG-compliant app config dir, or
    /// returns defaults when no file exists.
    pub async fn load() -> anyhow::Result<Self> {
        let path: PathBuf = Self::config_path()?;
        if path.exists() {
            let text: String = tokio::fs::read_to_string(&path).await?;
            let cfg: Config = toml::from_str(&text)?;
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Saves config to TOML at the XDG-compliant app config dir.
    pub async fn save(&self) -> anyhow::Result<()> {
        let path: PathBuf = Self::config_path()?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let toml_str: String = toml::to_string_pretty(self)?;
        tokio::fs::write(&path, toml_str).await?;
        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let proj_dirs: ProjectDirs = ProjectDirs::from("org", "example", "KbConsole")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.page_size, 10);
        assert_eq!(cfg.debounce, Duration::from_millis(300));
    }

    #[test]
    fn parses_humantime_durations() {
        let cfg: Config = toml::from_str(
            r#"
            base_url = "http://kb.internal/documents"
            page_size = 25
            debounce = "150ms"
            request_timeout = "10s"
            "#,
        )
        .expect("config should parse");
        assert_eq!(cfg.page_size, 25);
        assert_eq!(cfg.debounce, Duration::from_millis(150));
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
    }
}
