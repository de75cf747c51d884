//! Server configuration types for Chatline.
//!
//! `ServerConfig` represents the top-level `config.toml`. Every section and
//! field has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `~/.chatline/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub history: HistorySection,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Which store adapter backs the services.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSection {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Explicit SQLite URL. Defaults to `sqlite://{data_dir}/chatline.db`.
    #[serde(default)]
    pub database_url: Option<String>,
}

/// How a history query that supplies only one of `from`/`to` is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartialBoundsPolicy {
    /// Ignore the lone bound and use the default window.
    #[default]
    Fallback,
    /// Fail the request.
    Reject,
    /// Keep the supplied bound and default only the missing side.
    FillMissing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySection {
    #[serde(default)]
    pub partial_bounds: PartialBoundsPolicy,
}
