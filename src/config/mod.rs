use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self> {
        let configured_path =
            std::env::var("TRIBUTE_API_CONFIG").unwrap_or_else(|_| "config/api.toml".to_string());
        assert!(
            !configured_path.is_empty(),
            "Configuration path must be non-empty"
        );
        assert!(
            configured_path.len() < 4096,
            "Configuration path length exceeds hard limit"
        );

        let mut builder = Config::builder()
            .add_source(File::new(&configured_path, FileFormat::Toml).required(true));

        if let Ok(env_override) = std::env::var("TRIBUTE_API_ENV") {
            if !env_override.is_empty() {
                let env_file = format!("config/api.{}.toml", env_override);
                if Path::new(&env_file).exists() {
                    builder = builder.add_source(File::new(&env_file, FileFormat::Toml));
                }
            }
        }

        let settings = builder
            .build()
            .map_err(|err| map_config_error(err, &configured_path))?;
        let config: Self = settings
            .try_deserialize()
            .context("Failed to deserialize API configuration")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        assert!(
            self.server.port > 0,
            "Server port must be greater than zero"
        );
        let _ = self.store.request_timeout();
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Option<IpAddr>,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> SocketAddr {
        let host = self.host.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(self.port != 0, "HTTP port cannot be zero");
        assert!(self.port < 65535, "HTTP port must be below 65535");
        SocketAddr::new(host, self.port)
    }
}

/// Backing-store selection. Both `url` and `access_key` present selects the
/// remote adapter; both absent selects the local adapter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub access_key: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub request_timeout_ms: Option<u64>,
}

impl StoreConfig {
    /// Remote credentials when both are configured non-empty. Anything less
    /// keeps the selection on the local store; a half-configured remote is
    /// worth a warning but never blocks startup.
    pub fn remote(&self) -> Option<RemoteStoreConfig> {
        let url = self.url.as_deref().map(str::trim).filter(|v| !v.is_empty());
        let access_key = self
            .access_key
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty());
        match (url, access_key) {
            (Some(url), Some(access_key)) => Some(RemoteStoreConfig {
                url: url.to_string(),
                access_key: access_key.to_string(),
                timeout: self.request_timeout(),
            }),
            (None, None) => None,
            (Some(_), None) => {
                warn!("Remote store url is configured without access_key; using the local store");
                None
            }
            (None, Some(_)) => {
                warn!("Remote store access_key is configured without url; using the local store");
                None
            }
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    pub fn request_timeout(&self) -> Duration {
        let millis = self.request_timeout_ms.unwrap_or(3_000);
        assert!(millis >= 100, "Store request timeout must be at least 100ms");
        assert!(
            millis <= 60_000,
            "Store request timeout cannot exceed 60 seconds"
        );
        Duration::from_millis(millis)
    }
}

#[derive(Debug, Clone)]
pub struct RemoteStoreConfig {
    pub url: String,
    pub access_key: String,
    pub timeout: Duration,
}

fn map_config_error(err: ConfigError, path: &str) -> ConfigError {
    match err {
        ConfigError::NotFound(_) => ConfigError::NotFound(path.to_string()),
        other => other,
    }
}
