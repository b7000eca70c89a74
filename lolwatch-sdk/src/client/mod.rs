//! HTTP clients for the Riot, Discord and Data Dragon APIs.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod ddragon;
mod discord;
mod riot;

pub use ddragon::{DEFAULT_DATA_DRAGON, DataDragonClient};
pub use discord::{DEFAULT_DISCORD_API, DiscordClient};
pub use riot::{DEFAULT_RIOT_API, RiotClient};

use reqwest::StatusCode;
use url::Url;

/// Errors produced by the HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, timeout, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested resource does not exist (HTTP 404).
    #[error("resource not found")]
    NotFound,

    /// The server returned any other non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Join `path` onto `base`, keeping any path prefix `base` already has
/// (`https://discord.com/api/v10` + `channels/1` keeps the `/api/v10`).
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, ClientError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    Ok(base.join(path.trim_start_matches('/'))?)
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
