//! Collaborators the watcher talks to.
//!
//! The core never builds HTTP clients itself. The binary wires concrete
//! implementations (Riot, Discord) in; tests use in-memory fakes. Deadlines
//! are applied by the caller with `tokio::time::timeout`, so
//! implementations only need to be cancel-safe.

use crate::entities::{MatchDetail, MatchId, MatchSummary, ReportChannel, Summoner};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors from fetching match data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("not found")]
    NotFound,

    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Errors from delivering a report.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),

    #[error("delivery failed: {0}")]
    Failed(String),
}

/// Errors from resolving a persisted id into a live object.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("not found")]
    NotFound,

    #[error("lookup failed: {0}")]
    Failed(String),
}

/// Recent matches and match detail for summoners.
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Recent matches of `summoner`.
    ///
    /// Precondition relied on by detection: the list is ordered most recent
    /// first.
    async fn recent_matches(&self, summoner: &Summoner) -> Result<Vec<MatchSummary>, SourceError>;

    async fn match_detail(&self, match_id: MatchId) -> Result<MatchDetail, SourceError>;
}

/// Delivers report text to a channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, channel: &ReportChannel, text: &str) -> Result<(), NotifyError>;
}

/// Summoner id -> live summoner. Only used when loading persisted state.
#[async_trait]
pub trait SummonerResolver: Send + Sync {
    async fn resolve_summoner(&self, summoner_id: i64) -> Result<Summoner, ResolveError>;
}

/// Channel id -> live channel. Only used when loading persisted state.
#[async_trait]
pub trait ChannelResolver: Send + Sync {
    async fn resolve_channel(&self, channel_id: &str) -> Result<ReportChannel, ResolveError>;
}
