//! In-memory collaborators and fixtures for unit tests.

use crate::entities::{
    MatchDetail, MatchId, MatchSummary, Participant, ParticipantIdentity, ParticipantStats,
    ReportChannel, Summoner,
};
use crate::sources::{
    ChannelResolver, MatchSource, NotifyError, Notifier, ResolveError, SourceError,
    SummonerResolver,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn summoner(name: &str, id: i64, account_id: i64) -> Summoner {
    Summoner {
        id,
        account_id,
        name: name.into(),
    }
}

pub fn channel(id: &str) -> ReportChannel {
    ReportChannel {
        id: id.into(),
        name: format!("channel-{id}").into(),
    }
}

/// A match where `account_id` played `champion` in `lane` with the given KDA.
pub fn match_detail(
    match_id: i64,
    account_id: i64,
    champion: &str,
    lane: &str,
    (kills, deaths, assists): (u32, u32, u32),
    win: bool,
) -> MatchDetail {
    MatchDetail {
        match_id: MatchId(match_id),
        identities: vec![
            ParticipantIdentity {
                participant_id: 1,
                account_id: account_id + 1_000_000,
            },
            ParticipantIdentity {
                participant_id: 4,
                account_id,
            },
        ],
        participants: vec![
            Participant {
                participant_id: 1,
                champion: "Garen".into(),
                lane: "TOP".into(),
                stats: ParticipantStats {
                    kills: 0,
                    deaths: 0,
                    assists: 0,
                    win: !win,
                },
            },
            Participant {
                participant_id: 4,
                champion: champion.into(),
                lane: lane.into(),
                stats: ParticipantStats {
                    kills,
                    deaths,
                    assists,
                    win,
                },
            },
        ],
    }
}

fn take_failure(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

/// Match source serving a settable recent list and a fixed set of details.
#[derive(Default)]
pub struct FakeMatchSource {
    recent: Mutex<Vec<i64>>,
    details: Mutex<HashMap<i64, MatchDetail>>,
    recent_failures: AtomicUsize,
    detail_failures: AtomicUsize,
    recent_delay: Mutex<Option<Duration>>,
    detail_delay: Mutex<Option<Duration>>,
    pub recent_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl FakeMatchSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_recent(&self, ids: &[i64]) {
        *self.recent.lock().unwrap() = ids.to_vec();
    }

    pub fn add_detail(&self, detail: MatchDetail) {
        self.details.lock().unwrap().insert(detail.match_id.0, detail);
    }

    pub fn fail_recent(&self, times: usize) {
        self.recent_failures.store(times, Ordering::SeqCst);
    }

    pub fn fail_detail(&self, times: usize) {
        self.detail_failures.store(times, Ordering::SeqCst);
    }

    /// Make every recent-match call sleep for `delay` first.
    pub fn hang_recent_for(&self, delay: Duration) {
        *self.recent_delay.lock().unwrap() = Some(delay);
    }

    /// Make every match-detail call sleep for `delay` first.
    pub fn hang_detail_for(&self, delay: Duration) {
        *self.detail_delay.lock().unwrap() = Some(delay);
    }
}

async fn delay(slot: &Mutex<Option<Duration>>) {
    let delay = *slot.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl MatchSource for FakeMatchSource {
    async fn recent_matches(&self, _summoner: &Summoner) -> Result<Vec<MatchSummary>, SourceError> {
        self.recent_calls.fetch_add(1, Ordering::SeqCst);
        delay(&self.recent_delay).await;
        if take_failure(&self.recent_failures) {
            return Err(SourceError::Upstream("503 service unavailable".into()));
        }
        let ids = self.recent.lock().unwrap().clone();
        Ok(ids
            .into_iter()
            .map(|id| MatchSummary {
                match_id: MatchId(id),
            })
            .collect())
    }

    async fn match_detail(&self, match_id: MatchId) -> Result<MatchDetail, SourceError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        delay(&self.detail_delay).await;
        if take_failure(&self.detail_failures) {
            return Err(SourceError::Upstream("503 service unavailable".into()));
        }
        self.details
            .lock()
            .unwrap()
            .get(&match_id.0)
            .cloned()
            .ok_or(SourceError::NotFound)
    }
}

/// Notifier that records every successful delivery.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    failures: AtomicUsize,
    delay: Mutex<Option<Duration>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, times: usize) {
        self.failures.store(times, Ordering::SeqCst);
    }

    /// Make every delivery sleep for `delay` first.
    pub fn hang_for(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// `(channel id, text)` of every delivered message, in order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, channel: &ReportChannel, text: &str) -> Result<(), NotifyError> {
        delay(&self.delay).await;
        if take_failure(&self.failures) {
            return Err(NotifyError::Failed("missing access".into()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel.id.to_string(), text.to_owned()));
        Ok(())
    }
}

/// Resolvers backed by fixed maps; anything else is `NotFound`.
#[derive(Default)]
pub struct FakeResolvers {
    pub summoners: HashMap<i64, Summoner>,
    pub channels: HashMap<String, ReportChannel>,
    summoner_delays: HashMap<i64, Duration>,
    channel_delays: HashMap<String, Duration>,
}

impl FakeResolvers {
    pub fn with_summoner(mut self, summoner: Summoner) -> Self {
        self.summoners.insert(summoner.id, summoner);
        self
    }

    pub fn with_channel(mut self, channel: ReportChannel) -> Self {
        self.channels.insert(channel.id.to_string(), channel);
        self
    }

    /// Resolving `summoner_id` sleeps for `delay` first.
    pub fn hang_summoner(mut self, summoner_id: i64, delay: Duration) -> Self {
        self.summoner_delays.insert(summoner_id, delay);
        self
    }

    /// Resolving `channel_id` sleeps for `delay` first.
    pub fn hang_channel(mut self, channel_id: &str, delay: Duration) -> Self {
        self.channel_delays.insert(channel_id.to_string(), delay);
        self
    }
}

#[async_trait]
impl SummonerResolver for FakeResolvers {
    async fn resolve_summoner(&self, summoner_id: i64) -> Result<Summoner, ResolveError> {
        if let Some(delay) = self.summoner_delays.get(&summoner_id) {
            tokio::time::sleep(*delay).await;
        }
        self.summoners
            .get(&summoner_id)
            .cloned()
            .ok_or(ResolveError::NotFound)
    }
}

#[async_trait]
impl ChannelResolver for FakeResolvers {
    async fn resolve_channel(&self, channel_id: &str) -> Result<ReportChannel, ResolveError> {
        if let Some(delay) = self.channel_delays.get(channel_id) {
            tokio::time::sleep(*delay).await;
        }
        self.channels
            .get(channel_id)
            .cloned()
            .ok_or(ResolveError::NotFound)
    }
}
