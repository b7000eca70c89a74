//! Data Dragon client. Unauthenticated static data.

use reqwest::Client;
use url::Url;

use super::{ClientError, endpoint, parse_response};
use crate::objects::ddragon::{ChampionCatalog, ChampionListDto};

pub const DEFAULT_DATA_DRAGON: &str = "https://ddragon.leagueoflegends.com";

#[derive(Debug, Clone)]
pub struct DataDragonClient {
    http: Client,
    base_url: Url,
}

impl DataDragonClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /api/versions.json`, newest first.
    pub async fn versions(&self) -> Result<Vec<String>, ClientError> {
        let url = endpoint(&self.base_url, "api/versions.json")?;
        parse_response(self.http.get(url).send().await?).await
    }

    /// `GET /cdn/{version}/data/{locale}/champion.json`
    pub async fn champions(
        &self,
        version: &str,
        locale: &str,
    ) -> Result<ChampionListDto, ClientError> {
        let url = endpoint(
            &self.base_url,
            &format!("cdn/{version}/data/{locale}/champion.json"),
        )?;
        parse_response(self.http.get(url).send().await?).await
    }

    /// Fetch the champion list of the newest patch and index it by id.
    pub async fn latest_catalog(&self, locale: &str) -> Result<ChampionCatalog, ClientError> {
        let versions = self.versions().await?;
        let Some(latest) = versions.first() else {
            return Err(ClientError::NotFound);
        };
        let list = self.champions(latest, locale).await?;
        Ok(ChampionCatalog::from_list(list))
    }
}
