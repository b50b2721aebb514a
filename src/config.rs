//! Client-side configuration.
//!
//! Reads/writes `~/.carpetas/config.toml`. CLI flags override whatever is
//! stored here; missing file means built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_APP: &str = "transparencia";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Picker configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Portal base URL (e.g. "https://portal.example.gt").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// Admin application tag sent with every fetch.
    #[serde(default)]
    pub app: String,

    /// HTTP timeout in seconds.
    #[serde(rename = "timeout-secs", default)]
    pub timeout_secs: u64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            app: String::new(),
            timeout_secs: 0,
        }
    }
}

impl PickerConfig {
    /// Default config file path: ~/.carpetas/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: PickerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: String,
    pub app: String,
    pub timeout_secs: u64,
}

impl Settings {
    pub fn merge(config: &PickerConfig, cli: &crate::cli::Cli) -> anyhow::Result<Self> {
        let server = cli
            .server
            .clone()
            .or_else(|| {
                if config.server.is_empty() {
                    None
                } else {
                    Some(config.server.clone())
                }
            })
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No portal URL. Pass --server <URL> or set `server` in {}.",
                    PickerConfig::default_path().display()
                )
            })?;

        let app = cli.app.clone().unwrap_or_else(|| {
            if config.app.is_empty() {
                DEFAULT_APP.to_string()
            } else {
                config.app.clone()
            }
        });

        let timeout_secs = cli.timeout.unwrap_or(if config.timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            config.timeout_secs
        });

        Ok(Settings {
            server,
            app,
            timeout_secs,
        })
    }
}

/// Return the picker config directory (~/.carpetas).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".carpetas")
}
