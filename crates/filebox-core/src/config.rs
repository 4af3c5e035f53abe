use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default address of the storage service (the server listens on :8090).
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8090";

/// Global configuration loaded from `~/.config/filebox/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileboxConfig {
    /// Base URL of the storage service; `/download/{id}` and `/upload` are joined onto it.
    pub server_url: String,
    /// API key sent as the `access_token` header. CLI `--key` overrides it.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Directory downloads are saved into (None = current directory).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Optional connect timeout in seconds. There is never a total transfer deadline.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for FileboxConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_key: None,
            download_dir: None,
            connect_timeout_secs: None,
        }
    }
}

impl FileboxConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("filebox")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FileboxConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FileboxConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FileboxConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FileboxConfig::default();
        assert_eq!(cfg.server_url, "http://localhost:8090");
        assert!(cfg.api_key.is_none());
        assert!(cfg.download_dir.is_none());
        assert!(cfg.connect_timeout().is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FileboxConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FileboxConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.server_url, cfg.server_url);
        assert_eq!(parsed.api_key, cfg.api_key);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            server_url = "https://files.example.com"
            api_key = "k-123"
            download_dir = "/tmp/dl"
            connect_timeout_secs = 5
        "#;
        let cfg: FileboxConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.server_url, "https://files.example.com");
        assert_eq!(cfg.api_key.as_deref(), Some("k-123"));
        assert_eq!(cfg.download_dir, Some(PathBuf::from("/tmp/dl")));
        assert_eq!(cfg.connect_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn config_toml_only_server_url() {
        let cfg: FileboxConfig = toml::from_str(r#"server_url = "http://127.0.0.1:1""#).unwrap();
        assert!(cfg.api_key.is_none());
        assert!(cfg.connect_timeout_secs.is_none());
    }
}
