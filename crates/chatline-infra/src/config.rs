//! Configuration loading and data directory resolution for Chatline.
//!
//! Reads `config.toml` from the data directory (`~/.chatline/` in production)
//! or an explicit path, and deserializes it into [`ServerConfig`]. Falls back
//! to defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use chatline_types::config::ServerConfig;

use crate::sqlite::pool::default_database_url;

/// Resolve the Chatline data directory.
///
/// Priority: `CHATLINE_DATA_DIR` env var, then `~/.chatline`, then
/// `.chatline` in the current directory.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHATLINE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatline");
    }

    PathBuf::from(".chatline")
}

/// `{data_dir}/config.toml`.
pub fn default_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Load server configuration from `config_path`.
///
/// - If the file does not exist, returns [`ServerConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
pub async fn load_config(config_path: &Path) -> ServerConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", config_path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServerConfig::default()
        }
    }
}

/// The SQLite URL to open: the configured one, or the data-dir default.
pub fn resolve_database_url(config: &ServerConfig, data_dir: &Path) -> String {
    config
        .storage
        .database_url
        .clone()
        .unwrap_or_else(|| default_database_url(data_dir))
}

#[cfg(test)]
mod tests {
    use chatline_types::config::{PartialBoundsPolicy, StorageBackend};
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&default_config_path(tmp.path())).await;
        assert_eq!(config, ServerConfig::default());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = default_config_path(tmp.path());
        tokio::fs::write(
            &config_path,
            r#"
[server]
host = "0.0.0.0"
port = 3000

[storage]
backend = "memory"

[history]
partial_bounds = "reject"
"#,
        )
        .await
        .unwrap();

        let config = load_config(&config_path).await;
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.history.partial_bounds, PartialBoundsPolicy::Reject);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = default_config_path(tmp.path());
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(&config_path).await;
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn resolve_database_url_prefers_configured() {
        let mut config = ServerConfig::default();
        let data_dir = Path::new("/data");
        assert_eq!(
            resolve_database_url(&config, data_dir),
            "sqlite:///data/chatline.db?mode=rwc"
        );

        config.storage.database_url = Some("sqlite::memory:".to_string());
        assert_eq!(resolve_database_url(&config, data_dir), "sqlite::memory:");
    }
}
