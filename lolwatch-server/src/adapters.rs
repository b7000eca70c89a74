//! Wiring between the HTTP clients and the watch engine's collaborator
//! traits.

use async_trait::async_trait;
use lolwatch_core::entities::{MatchDetail, MatchId, MatchSummary, ReportChannel, Summoner};
use lolwatch_core::sources::{
    ChannelResolver, MatchSource, Notifier, NotifyError, ResolveError, SourceError,
    SummonerResolver,
};
use lolwatch_sdk::client::{ClientError, DiscordClient, RiotClient};
use lolwatch_sdk::objects::ChampionCatalog;

/// Summoner lookup by display name, used when a watch is requested.
#[async_trait]
pub trait SummonerDirectory: Send + Sync {
    async fn summoner_by_name(&self, name: &str) -> Result<Summoner, ResolveError>;
}

/// Riot-backed match source and summoner lookups.
pub struct RiotAdapter {
    client: RiotClient,
    champions: ChampionCatalog,
}

impl RiotAdapter {
    pub fn new(client: RiotClient, champions: ChampionCatalog) -> Self {
        Self { client, champions }
    }
}

fn source_error(e: ClientError) -> SourceError {
    match e {
        ClientError::NotFound => SourceError::NotFound,
        other => SourceError::Upstream(other.to_string()),
    }
}

fn resolve_error(e: ClientError) -> ResolveError {
    match e {
        ClientError::NotFound => ResolveError::NotFound,
        other => ResolveError::Failed(other.to_string()),
    }
}

#[async_trait]
impl MatchSource for RiotAdapter {
    async fn recent_matches(&self, summoner: &Summoner) -> Result<Vec<MatchSummary>, SourceError> {
        let list = match self.client.recent_matchlist(summoner.account_id).await {
            Ok(list) => list,
            // Riot answers 404 for an account with no match history.
            Err(ClientError::NotFound) => return Ok(Vec::new()),
            Err(e) => return Err(source_error(e)),
        };
        Ok(list.matches.into_iter().map(MatchSummary::from).collect())
    }

    async fn match_detail(&self, match_id: MatchId) -> Result<MatchDetail, SourceError> {
        let dto = self
            .client
            .match_by_id(match_id.0)
            .await
            .map_err(source_error)?;
        Ok(MatchDetail::from_dto(dto, |id| self.champions.name(id)))
    }
}

#[async_trait]
impl SummonerResolver for RiotAdapter {
    async fn resolve_summoner(&self, summoner_id: i64) -> Result<Summoner, ResolveError> {
        self.client
            .summoner_by_id(summoner_id)
            .await
            .map(Summoner::from)
            .map_err(resolve_error)
    }
}

#[async_trait]
impl SummonerDirectory for RiotAdapter {
    async fn summoner_by_name(&self, name: &str) -> Result<Summoner, ResolveError> {
        self.client
            .summoner_by_name(name)
            .await
            .map(Summoner::from)
            .map_err(resolve_error)
    }
}

/// Discord-backed report delivery and channel lookups.
pub struct DiscordAdapter {
    client: DiscordClient,
}

impl DiscordAdapter {
    pub fn new(client: DiscordClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for DiscordAdapter {
    async fn send(&self, channel: &ReportChannel, text: &str) -> Result<(), NotifyError> {
        self.client
            .create_message(&channel.id, text)
            .await
            .map(|_| ())
            .map_err(|e| NotifyError::Failed(e.to_string()))
    }
}

#[async_trait]
impl ChannelResolver for DiscordAdapter {
    async fn resolve_channel(&self, channel_id: &str) -> Result<ReportChannel, ResolveError> {
        self.client
            .channel(channel_id)
            .await
            .map(ReportChannel::from)
            .map_err(resolve_error)
    }
}
