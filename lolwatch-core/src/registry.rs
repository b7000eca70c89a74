//! The shared registry of active watches.
//!
//! `WatchRegistry` is the only structure shared by every worker, the command
//! surface and the bootstrap/shutdown paths. Its map sits behind a single
//! `RwLock`: insert takes the write guard, everything else the read guard.
//! The one mutable field of an entry has its own lock so workers never
//! serialize on the registry while reading or advancing it.

use crate::entities::{MatchId, ReportChannel, Summoner, WatchKey};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("already watching {0}")]
    AlreadyWatched(WatchKey),
}

/// One monitoring relationship: a summoner, the channel its reports go to,
/// and the last match already reported.
#[derive(Debug)]
pub struct WatchEntry {
    key: WatchKey,
    summoner: Summoner,
    channel: ReportChannel,
    last_reported: Mutex<MatchId>,
}

impl WatchEntry {
    /// A fresh watch that has not reported anything yet.
    pub fn new(key: WatchKey, summoner: Summoner, channel: ReportChannel) -> Self {
        Self::restored(key, summoner, channel, MatchId::NONE)
    }

    /// A watch rebuilt from persisted state.
    pub fn restored(
        key: WatchKey,
        summoner: Summoner,
        channel: ReportChannel,
        last_reported: MatchId,
    ) -> Self {
        Self {
            key,
            summoner,
            channel,
            last_reported: Mutex::new(last_reported),
        }
    }

    pub fn key(&self) -> &WatchKey {
        &self.key
    }

    pub fn summoner(&self) -> &Summoner {
        &self.summoner
    }

    pub fn channel(&self) -> &ReportChannel {
        &self.channel
    }

    pub async fn last_reported(&self) -> MatchId {
        *self.last_reported.lock().await
    }

    /// Record `match_id` as delivered.
    pub async fn mark_reported(&self, match_id: MatchId) {
        *self.last_reported.lock().await = match_id;
    }
}

/// Thread-safe `WatchKey -> WatchEntry` map. Cloning shares the same map.
#[derive(Debug, Clone, Default)]
pub struct WatchRegistry {
    inner: Arc<RwLock<HashMap<WatchKey, Arc<WatchEntry>>>>,
}

impl WatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` under its key.
    ///
    /// Fails without touching the map if the key is already present. Outside
    /// this crate entries are added through `WatchSupervisor::start_watching`,
    /// which also spawns the entry's worker.
    pub(crate) async fn insert(&self, entry: WatchEntry) -> Result<Arc<WatchEntry>, RegistryError> {
        let mut map = self.inner.write().await;
        if map.contains_key(entry.key()) {
            return Err(RegistryError::AlreadyWatched(entry.key().clone()));
        }
        let entry = Arc::new(entry);
        map.insert(entry.key().clone(), Arc::clone(&entry));
        Ok(entry)
    }

    pub async fn lookup(&self, key: &WatchKey) -> Option<Arc<WatchEntry>> {
        self.inner.read().await.get(key).cloned()
    }

    /// All entries, sorted by key.
    pub async fn snapshot(&self) -> Vec<Arc<WatchEntry>> {
        let mut entries: Vec<_> = self.inner.read().await.values().cloned().collect();
        entries.sort_by(|a, b| a.key().cmp(b.key()));
        entries
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
