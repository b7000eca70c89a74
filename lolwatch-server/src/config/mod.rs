//! Configuration module for lolwatch-server.
//!
//! Handles loading configuration from the TOML file and CLI overrides, and
//! resolving credentials through the configured secret provider.

pub mod file;
pub mod secrets;

use crate::config::file::FileConfig;
use crate::config::secrets::Credentials;
use lolwatch_core::config::WatchSettings;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("failed to parse secrets file: {0}")]
    SecretsParseError(#[from] serde_json::Error),

    #[error("invalid url for {field}: {source}")]
    InvalidUrl {
        field: &'static str,
        source: url::ParseError,
    },

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("environment variable {0} not set")]
    MissingEnv(String),
}

/// Upstream endpoints.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub riot_base: Url,
    pub discord_base: Url,
    pub data_dragon_base: Url,
    pub data_dragon_locale: String,
}

/// Loaded configuration result containing all parts.
#[derive(Debug)]
pub struct LoadedConfig {
    pub listen: SocketAddr,
    pub upstream: UpstreamConfig,
    pub watch: WatchSettings,
    pub credentials: Credentials,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    listen_override: Option<SocketAddr>,
    state_override: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(
        config_path: impl AsRef<Path>,
        listen_override: Option<SocketAddr>,
        state_override: Option<PathBuf>,
    ) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
            state_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Load credentials from the secret provider
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let file_config: FileConfig = toml::from_str(&config_content)?;
        self.build(file_config, |name| std::env::var(name).ok())
    }

    fn build(
        &self,
        mut file_config: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<LoadedConfig, ConfigError> {
        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }
        if let Some(state) = &self.state_override {
            file_config.watch.state_path = state.clone();
        }

        let watch = watch_settings(&file_config)?;
        let upstream = UpstreamConfig {
            riot_base: parse_url("riot.base_url", &file_config.riot.base_url)?,
            discord_base: parse_url("discord.api_base", &file_config.discord.api_base)?,
            data_dragon_base: parse_url("data_dragon.base_url", &file_config.data_dragon.base_url)?,
            data_dragon_locale: file_config.data_dragon.locale,
        };
        let credentials = file_config.secrets.load_with(env)?;

        Ok(LoadedConfig {
            listen: file_config.server.listen,
            upstream,
            watch,
            credentials,
        })
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl { field, source })
}

fn watch_settings(config: &FileConfig) -> Result<WatchSettings, ConfigError> {
    let watch = &config.watch;
    if watch.poll_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "watch.poll_interval_secs must be positive".to_string(),
        ));
    }
    if watch.request_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "watch.request_timeout_secs must be positive".to_string(),
        ));
    }
    if watch.max_concurrent_polls == 0 {
        return Err(ConfigError::ValidationError(
            "watch.max_concurrent_polls must be positive".to_string(),
        ));
    }
    if watch.shutdown_grace_secs == 0 {
        return Err(ConfigError::ValidationError(
            "watch.shutdown_grace_secs must be positive".to_string(),
        ));
    }
    if config.data_dragon.locale.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "data_dragon.locale must not be empty".to_string(),
        ));
    }

    Ok(WatchSettings {
        poll_interval: Duration::from_secs(watch.poll_interval_secs),
        request_timeout: Duration::from_secs(watch.request_timeout_secs),
        max_concurrent_polls: watch.max_concurrent_polls,
        shutdown_grace: Duration::from_secs(watch.shutdown_grace_secs),
        state_path: watch.state_path.clone(),
    })
}
