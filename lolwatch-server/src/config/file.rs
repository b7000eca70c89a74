//! TOML file configuration structures.
//!
//! These structs directly map to the `lolwatch.toml` file format. Every
//! section is optional; a missing section takes its defaults.

use super::secrets::SecretProvider;
use lolwatch_core::config::DEFAULT_STATE_PATH;
use lolwatch_sdk::client::{DEFAULT_DATA_DRAGON, DEFAULT_DISCORD_API, DEFAULT_RIOT_API};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: ServerConfig,
    pub riot: RiotConfig,
    pub discord: DiscordConfig,
    pub data_dragon: DataDragonConfig,
    pub watch: WatchConfig,
    pub secrets: SecretProvider,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, 8080))
}

/// Riot API section. The base URL selects the platform (region).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiotConfig {
    #[serde(default = "default_riot_base")]
    pub base_url: String,
}

impl Default for RiotConfig {
    fn default() -> Self {
        Self {
            base_url: default_riot_base(),
        }
    }
}

fn default_riot_base() -> String {
    DEFAULT_RIOT_API.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    #[serde(default = "default_discord_base")]
    pub api_base: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            api_base: default_discord_base(),
        }
    }
}

fn default_discord_base() -> String {
    DEFAULT_DISCORD_API.to_string()
}

/// Data Dragon section, used to name champions in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataDragonConfig {
    #[serde(default = "default_ddragon_base")]
    pub base_url: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for DataDragonConfig {
    fn default() -> Self {
        Self {
            base_url: default_ddragon_base(),
            locale: default_locale(),
        }
    }
}

fn default_ddragon_base() -> String {
    DEFAULT_DATA_DRAGON.to_string()
}

fn default_locale() -> String {
    "en_US".to_string()
}

/// Watch engine section. Durations are whole seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub max_concurrent_polls: usize,
    pub shutdown_grace_secs: u64,
    pub state_path: PathBuf,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
            request_timeout_secs: 5,
            max_concurrent_polls: 16,
            shutdown_grace_secs: 10,
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
        }
    }
}
