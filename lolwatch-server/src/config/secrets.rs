//! Credential loading.
//!
//! The provider is a closed set chosen in the config file's `[secrets]`
//! section by its `provider` tag.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the Riot API key and Discord bot token come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum SecretProvider {
    /// A JSON file `{ "RiotApiKey": "...", "DiscordAuthToken": "..." }`.
    RawFile { location: PathBuf },
    /// Two environment variables.
    Env {
        #[serde(default = "default_riot_var")]
        riot_api_key_var: String,
        #[serde(default = "default_discord_var")]
        discord_token_var: String,
    },
}

fn default_riot_var() -> String {
    "RIOT_APIKEY".to_string()
}

fn default_discord_var() -> String {
    "DISCORD_AUTH".to_string()
}

impl Default for SecretProvider {
    fn default() -> Self {
        SecretProvider::Env {
            riot_api_key_var: default_riot_var(),
            discord_token_var: default_discord_var(),
        }
    }
}

/// Loaded credentials. `Debug` never prints the values.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub riot_api_key: String,
    pub discord_token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("riot_api_key", &"<redacted>")
            .field("discord_token", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct SecretsFile {
    #[serde(rename = "RiotApiKey", alias = "riot_api_key")]
    riot_api_key: String,
    #[serde(rename = "DiscordAuthToken", alias = "discord_token")]
    discord_token: String,
}

impl SecretProvider {
    /// Load credentials, reading environment variables through `env`.
    pub fn load_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Credentials, ConfigError> {
        let credentials = match self {
            SecretProvider::RawFile { location } => {
                tracing::debug!(location = %location.display(), "Loading secrets from raw file");
                let content = std::fs::read_to_string(location)?;
                let file: SecretsFile = serde_json::from_str(&content)?;
                Credentials {
                    riot_api_key: file.riot_api_key,
                    discord_token: file.discord_token,
                }
            }
            SecretProvider::Env {
                riot_api_key_var,
                discord_token_var,
            } => {
                tracing::debug!(%riot_api_key_var, %discord_token_var, "Loading secrets from environment");
                Credentials {
                    riot_api_key: env(riot_api_key_var)
                        .ok_or_else(|| ConfigError::MissingEnv(riot_api_key_var.clone()))?,
                    discord_token: env(discord_token_var)
                        .ok_or_else(|| ConfigError::MissingEnv(discord_token_var.clone()))?,
                }
            }
        };

        if credentials.riot_api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError("no Riot API key".to_string()));
        }
        if credentials.discord_token.trim().is_empty() {
            return Err(ConfigError::ValidationError("no Discord auth token".to_string()));
        }
        Ok(credentials)
    }
}
