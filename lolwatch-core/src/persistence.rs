//! Durable state of the registry.
//!
//! The registry is flattened into one `SerializedRecord` per watch and
//! written as a JSON object keyed by watch key:
//!
//! ```json
//! { "someguy": { "summonerId": 55, "channelId": "500", "lastReportedMatchId": 1002 } }
//! ```
//!
//! Loading re-resolves every summoner and channel through live lookups.
//! Each record is reconciled on its own: a stale id only drops that watch
//! and is reported back, the rest of the registry still loads.

use crate::entities::{MatchId, WatchKey};
use crate::registry::{WatchEntry, WatchRegistry};
use crate::sources::{ChannelResolver, ResolveError, SummonerResolver};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Errors reading, writing, encoding or decoding the state file.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("state file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode state: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode state: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Why a single persisted watch could not be restored.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("summoner {summoner_id}: {source}")]
    Summoner {
        summoner_id: i64,
        #[source]
        source: ResolveError,
    },

    #[error("channel {channel_id}: {source}")]
    Channel {
        channel_id: CompactString,
        #[source]
        source: ResolveError,
    },

    #[error("{name:?} normalizes to the same key as another saved watch")]
    DuplicateKey { name: CompactString },
}

/// Persisted projection of a `WatchEntry`.
///
/// The aliases accept state files written by the earlier Go bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedRecord {
    #[serde(alias = "LolSummonerId")]
    pub summoner_id: i64,
    #[serde(alias = "DiscordChannelId")]
    pub channel_id: CompactString,
    #[serde(alias = "LastGameReported", default)]
    pub last_reported_match_id: MatchId,
}

pub type RecordSet = BTreeMap<WatchKey, SerializedRecord>;

/// Records as written in the file, keyed by the name before normalization.
pub type RawRecordSet = BTreeMap<CompactString, SerializedRecord>;

/// Snapshot every entry of `registry`, reading each last-reported id under
/// its entry lock.
pub async fn flatten(registry: &WatchRegistry) -> RecordSet {
    let mut records = RecordSet::new();
    for entry in registry.snapshot().await {
        debug!(key = %entry.key(), "Flattening watch");
        records.insert(
            entry.key().clone(),
            SerializedRecord {
                summoner_id: entry.summoner().id,
                channel_id: entry.channel().id.clone(),
                last_reported_match_id: entry.last_reported().await,
            },
        );
    }
    records
}

pub fn encode(records: &RecordSet) -> Result<Vec<u8>, PersistError> {
    serde_json::to_vec_pretty(records).map_err(PersistError::Encode)
}

pub fn decode(bytes: &[u8]) -> Result<RawRecordSet, PersistError> {
    serde_json::from_slice(bytes).map_err(PersistError::Decode)
}

/// Result of loading a state file.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Every record that reconciled, with its last-reported id.
    pub registry: WatchRegistry,
    /// Records that could not be restored, by key.
    pub failures: Vec<(WatchKey, ReconcileError)>,
}

/// Decode `bytes` and reconcile each record against live lookups.
///
/// Only a decode failure fails the whole load. Every resolver call is
/// bounded by `timeout`. When several names normalize to one key the first
/// in key order is restored and the rest are reported as duplicates.
pub async fn load(
    bytes: &[u8],
    summoners: &dyn SummonerResolver,
    channels: &dyn ChannelResolver,
    timeout: Duration,
) -> Result<LoadReport, PersistError> {
    let records = decode(bytes)?;
    let mut report = LoadReport::default();
    let mut seen = BTreeSet::new();

    for (name, record) in records {
        let key = WatchKey::from_name(&name);
        if !seen.insert(key.clone()) {
            report.failures.push((key, ReconcileError::DuplicateKey { name }));
            continue;
        }
        match reconcile(&key, &record, summoners, channels, timeout).await {
            Ok(entry) => {
                // `seen` rules out a second entry under this key.
                let _ = report.registry.insert(entry).await;
            }
            Err(e) => report.failures.push((key, e)),
        }
    }

    Ok(report)
}

async fn reconcile(
    key: &WatchKey,
    record: &SerializedRecord,
    summoners: &dyn SummonerResolver,
    channels: &dyn ChannelResolver,
    timeout: Duration,
) -> Result<WatchEntry, ReconcileError> {
    let summoner = tokio::time::timeout(timeout, summoners.resolve_summoner(record.summoner_id))
        .await
        .unwrap_or(Err(ResolveError::Timeout(timeout)))
        .map_err(|source| ReconcileError::Summoner {
            summoner_id: record.summoner_id,
            source,
        })?;

    let channel = tokio::time::timeout(timeout, channels.resolve_channel(&record.channel_id))
        .await
        .unwrap_or(Err(ResolveError::Timeout(timeout)))
        .map_err(|source| ReconcileError::Channel {
            channel_id: record.channel_id.clone(),
            source,
        })?;

    Ok(WatchEntry::restored(
        key.clone(),
        summoner,
        channel,
        record.last_reported_match_id,
    ))
}

/// The on-disk location of the state.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw state. `Ok(None)` if the file does not exist.
    pub async fn read(&self) -> Result<Option<Vec<u8>>, PersistError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Encode `records` and replace the state file atomically.
    ///
    /// Writes and syncs a sibling temp file, then renames it over the
    /// target, so a crash mid-write leaves the previous state intact. On
    /// unix the file is created owner read/write only.
    pub async fn save(&self, records: &RecordSet) -> Result<(), PersistError> {
        let bytes = encode(records)?;

        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&temp_path).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // A temp file left by an earlier run keeps its old mode.
            tokio::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .await?;
        }

        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}
