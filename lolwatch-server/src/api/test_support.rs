//! In-memory collaborators for handler tests.

use crate::adapters::SummonerDirectory;
use crate::state::AppState;
use async_trait::async_trait;
use lolwatch_core::config::WatchSettings;
use lolwatch_core::entities::{MatchDetail, MatchId, MatchSummary, ReportChannel, Summoner};
use lolwatch_core::processors::WatchSupervisor;
use lolwatch_core::registry::WatchRegistry;
use lolwatch_core::sources::{
    ChannelResolver, MatchSource, Notifier, NotifyError, ResolveError, SourceError,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub(crate) struct IdleSource;

#[async_trait]
impl MatchSource for IdleSource {
    async fn recent_matches(&self, _: &Summoner) -> Result<Vec<MatchSummary>, SourceError> {
        Ok(Vec::new())
    }

    async fn match_detail(&self, _: MatchId) -> Result<MatchDetail, SourceError> {
        Err(SourceError::NotFound)
    }
}

#[derive(Default)]
pub(crate) struct Directory {
    summoners: HashMap<String, Summoner>,
    channels: HashMap<String, ReportChannel>,
    sent: Mutex<Vec<(String, String)>>,
}

impl Directory {
    pub(crate) fn with_summoner(mut self, name: &str, id: i64) -> Self {
        self.summoners.insert(
            name.to_lowercase(),
            Summoner {
                id,
                account_id: id + 1000,
                name: name.into(),
            },
        );
        self
    }

    pub(crate) fn with_channel(mut self, id: &str) -> Self {
        self.channels.insert(
            id.to_string(),
            ReportChannel {
                id: id.into(),
                name: format!("channel-{id}").into(),
            },
        );
        self
    }

    pub(crate) fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummonerDirectory for Directory {
    async fn summoner_by_name(&self, name: &str) -> Result<Summoner, ResolveError> {
        self.summoners
            .get(&name.to_lowercase())
            .cloned()
            .ok_or(ResolveError::NotFound)
    }
}

#[async_trait]
impl ChannelResolver for Directory {
    async fn resolve_channel(&self, channel_id: &str) -> Result<ReportChannel, ResolveError> {
        self.channels
            .get(channel_id)
            .cloned()
            .ok_or(ResolveError::NotFound)
    }
}

#[async_trait]
impl Notifier for Directory {
    async fn send(&self, channel: &ReportChannel, text: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((channel.id.to_string(), text.to_string()));
        Ok(())
    }
}

pub(crate) fn app_state(directory: Arc<Directory>) -> AppState {
    let supervisor = Arc::new(WatchSupervisor::new(
        WatchRegistry::new(),
        Arc::new(IdleSource),
        directory.clone(),
        WatchSettings::default(),
    ));
    AppState::new(supervisor, directory.clone(), directory.clone(), directory)
}
