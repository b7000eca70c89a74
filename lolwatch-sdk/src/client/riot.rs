//! Riot API client (summoner-v3 and match-v3).
//!
//! Every request carries the API key in the `X-Riot-Token` header. The base
//! URL selects the platform, e.g. `https://na1.api.riotgames.com`.

use reqwest::Client;
use url::Url;

use super::{ClientError, endpoint, parse_response};
use crate::objects::riot::{MatchDto, MatchlistDto, SummonerDto};

pub const RIOT_TOKEN_HEADER: &str = "X-Riot-Token";

/// North America platform host.
pub const DEFAULT_RIOT_API: &str = "https://na1.api.riotgames.com";

/// Typed HTTP client for the Riot API.
#[derive(Debug, Clone)]
pub struct RiotClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl RiotClient {
    /// Create a new `RiotClient`.
    ///
    /// * `base_url` – platform host, e.g. `https://na1.api.riotgames.com`.
    /// * `api_key` – the Riot developer or production key.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /lol/summoner/v3/summoners/by-name/{name}`
    pub async fn summoner_by_name(&self, name: &str) -> Result<SummonerDto, ClientError> {
        let path = format!(
            "lol/summoner/v3/summoners/by-name/{}",
            urlencoding::encode(name)
        );
        self.get(&path).await
    }

    /// `GET /lol/summoner/v3/summoners/{summonerId}`
    pub async fn summoner_by_id(&self, summoner_id: i64) -> Result<SummonerDto, ClientError> {
        self.get(&format!("lol/summoner/v3/summoners/{summoner_id}"))
            .await
    }

    /// `GET /lol/match/v3/matchlists/by-account/{accountId}/recent`
    ///
    /// Matches are returned most recent first.
    pub async fn recent_matchlist(&self, account_id: i64) -> Result<MatchlistDto, ClientError> {
        self.get(&format!(
            "lol/match/v3/matchlists/by-account/{account_id}/recent"
        ))
        .await
    }

    /// `GET /lol/match/v3/matches/{matchId}`
    pub async fn match_by_id(&self, match_id: i64) -> Result<MatchDto, ClientError> {
        self.get(&format!("lol/match/v3/matches/{match_id}")).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = endpoint(&self.base_url, path)?;

        let resp = self
            .http
            .get(url)
            .header(RIOT_TOKEN_HEADER, &self.api_key)
            .send()
            .await?;

        parse_response(resp).await
    }
}
