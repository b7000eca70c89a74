//! WatchSupervisor.
//!
//! The supervisor is the context object the rest of the process holds:
//! - It owns the `WatchRegistry` and the shared collaborators
//! - `start_watching` is the only mutating entry point of the registry
//! - It spawns exactly one `WatchWorker` per registry entry
//! - `shutdown` signals every worker and joins them deterministically
//!
//! The worker list lock is held across "insert + spawn" and "snapshot +
//! spawn", which is what keeps the one-worker-per-key invariant when a
//! live request races the startup restore.

use super::watch_worker::WatchWorker;
use crate::config::WatchSettings;
use crate::entities::{ReportChannel, Summoner, WatchKey};
use crate::registry::{RegistryError, WatchEntry, WatchRegistry};
use crate::sources::{MatchSource, Notifier};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub struct WatchSupervisor {
    registry: WatchRegistry,
    source: Arc<dyn MatchSource>,
    notifier: Arc<dyn Notifier>,
    settings: WatchSettings,
    permits: Arc<Semaphore>,
    shutdown_tx: watch::Sender<bool>,
    workers: Mutex<Vec<(WatchKey, JoinHandle<()>)>>,
}

impl WatchSupervisor {
    /// Create a supervisor over `registry`. No workers are started until
    /// [`spawn_restored`](Self::spawn_restored) or
    /// [`start_watching`](Self::start_watching) is called.
    pub fn new(
        registry: WatchRegistry,
        source: Arc<dyn MatchSource>,
        notifier: Arc<dyn Notifier>,
        settings: WatchSettings,
    ) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        let permits = Arc::new(Semaphore::new(settings.max_concurrent_polls.max(1)));
        Self {
            registry,
            source,
            notifier,
            settings,
            permits,
            shutdown_tx,
            workers: Mutex::new(Vec::new()),
        }
    }

    pub fn registry(&self) -> &WatchRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &WatchSettings {
        &self.settings
    }

    /// Register a new watch and start its worker.
    ///
    /// Returns `AlreadyWatched` without side effects if `key` is taken.
    pub async fn start_watching(
        &self,
        key: WatchKey,
        summoner: Summoner,
        channel: ReportChannel,
    ) -> Result<Arc<WatchEntry>, RegistryError> {
        let mut workers = self.workers.lock().await;

        let entry = self
            .registry
            .insert(WatchEntry::new(key, summoner, channel))
            .await?;

        info!(
            key = %entry.key(),
            summoner = %entry.summoner().name,
            channel = %entry.channel().name,
            "Started watching"
        );
        workers.push((entry.key().clone(), self.spawn_worker(Arc::clone(&entry))));
        Ok(entry)
    }

    /// Spawn workers for every registry entry that does not have one yet.
    ///
    /// Called once after the registry is restored from disk. Returns the
    /// number of workers spawned.
    pub async fn spawn_restored(&self) -> usize {
        let mut workers = self.workers.lock().await;
        let mut spawned = 0;

        for entry in self.registry.snapshot().await {
            if workers.iter().any(|(key, _)| key == entry.key()) {
                continue;
            }
            info!(key = %entry.key(), summoner = %entry.summoner().name, "Resuming watch");
            workers.push((entry.key().clone(), self.spawn_worker(entry)));
            spawned += 1;
        }

        spawned
    }

    pub async fn worker_count(&self) -> usize {
        self.workers.lock().await.len()
    }

    /// Signal every worker to stop and wait for them.
    ///
    /// Workers still running after the grace period are aborted. The
    /// registry is left intact so it can be persisted afterwards.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
        self.permits.close();

        let workers: Vec<_> = self.workers.lock().await.drain(..).collect();
        info!(workers = workers.len(), "Stopping watch workers");

        for (key, mut handle) in workers {
            match tokio::time::timeout(self.settings.shutdown_grace, &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(%key, error = %e, "WatchWorker ended abnormally"),
                Err(_) => {
                    warn!(%key, "WatchWorker did not stop in time, aborting");
                    handle.abort();
                }
            }
        }

        info!("WatchSupervisor shutdown complete");
    }

    fn spawn_worker(&self, entry: Arc<WatchEntry>) -> JoinHandle<()> {
        let worker = WatchWorker::new(
            entry,
            Arc::clone(&self.source),
            Arc::clone(&self.notifier),
            self.settings.clone(),
            Arc::clone(&self.permits),
        );
        tokio::spawn(worker.run(self.shutdown_tx.subscribe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MatchId;
    use crate::test_support::{FakeMatchSource, RecordingNotifier, channel, match_detail, summoner};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn supervisor(
        registry: WatchRegistry,
    ) -> (Arc<WatchSupervisor>, Arc<FakeMatchSource>, Arc<RecordingNotifier>) {
        let source = Arc::new(FakeMatchSource::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let supervisor = Arc::new(WatchSupervisor::new(
            registry,
            source.clone(),
            notifier.clone(),
            WatchSettings::default(),
        ));
        (supervisor, source, notifier)
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_watching_spawns_worker() {
        let (supervisor, source, notifier) = supervisor(WatchRegistry::new());
        source.set_recent(&[1002]);
        source.add_detail(match_detail(1002, 77, "Ahri", "MID", (10, 2, 5), true));

        let entry = supervisor
            .start_watching(
                WatchKey::from_name("Some Guy"),
                summoner("Some Guy", 55, 77),
                channel("500"),
            )
            .await
            .unwrap();
        assert_eq!(supervisor.worker_count().await, 1);

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(entry.last_reported().await, MatchId(1002));
        assert_eq!(notifier.sent().len(), 1);

        supervisor.shutdown().await;
    }

    #[tokio::test]
    async fn test_start_watching_twice_rejected() {
        let (supervisor, _, _) = supervisor(WatchRegistry::new());

        supervisor
            .start_watching(
                WatchKey::from_name("Some Guy"),
                summoner("Some Guy", 55, 77),
                channel("500"),
            )
            .await
            .unwrap();
        let err = supervisor
            .start_watching(
                WatchKey::from_name("someguy"),
                summoner("someguy", 55, 77),
                channel("600"),
            )
            .await
            .unwrap_err();

        assert_eq!(err, RegistryError::AlreadyWatched(WatchKey::from_name("someguy")));
        assert_eq!(supervisor.worker_count().await, 1);
        assert_eq!(supervisor.registry().len().await, 1);

        supervisor.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_start_watching_one_success() {
        let (supervisor, _, _) = supervisor(WatchRegistry::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let supervisor = Arc::clone(&supervisor);
            handles.push(tokio::spawn(async move {
                supervisor
                    .start_watching(
                        WatchKey::from_name("Some Guy"),
                        summoner("Some Guy", 55, 77),
                        channel(&i.to_string()),
                    )
                    .await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(supervisor.worker_count().await, 1);

        supervisor.shutdown().await;
    }

    #[tokio::test]
    async fn test_spawn_restored_once_per_entry() {
        let registry = WatchRegistry::new();
        for (name, id) in [("alpha", 1), ("bravo", 2)] {
            registry
                .insert(WatchEntry::new(
                    WatchKey::from_name(name),
                    summoner(name, id, id),
                    channel("500"),
                ))
                .await
                .unwrap();
        }
        let (supervisor, _, _) = supervisor(registry);

        assert_eq!(supervisor.spawn_restored().await, 2);
        assert_eq!(supervisor.spawn_restored().await, 0);
        assert_eq!(supervisor.worker_count().await, 2);

        supervisor.shutdown().await;
    }

    async fn assert_one_worker_per_entry(supervisor: &WatchSupervisor) {
        assert_eq!(
            supervisor.registry().len().await,
            supervisor.worker_count().await
        );
    }

    #[tokio::test]
    async fn test_every_entry_has_one_worker() {
        let registry = WatchRegistry::new();
        registry
            .insert(WatchEntry::new(
                WatchKey::from_name("alpha"),
                summoner("alpha", 1, 1),
                channel("500"),
            ))
            .await
            .unwrap();
        let (supervisor, _, _) = supervisor(registry);

        assert_eq!(supervisor.worker_count().await, 0);

        supervisor.spawn_restored().await;
        assert_one_worker_per_entry(&supervisor).await;

        for (name, id) in [("bravo", 2), ("alpha", 1), ("charlie", 3), ("BRAVO", 2)] {
            let _ = supervisor
                .start_watching(WatchKey::from_name(name), summoner(name, id, id), channel("500"))
                .await;
            assert_one_worker_per_entry(&supervisor).await;
        }

        supervisor.spawn_restored().await;
        assert_one_worker_per_entry(&supervisor).await;
        assert_eq!(supervisor.worker_count().await, 3);

        supervisor.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_joins_workers_and_stops_polling() {
        let (supervisor, source, _) = supervisor(WatchRegistry::new());
        source.set_recent(&[]);

        supervisor
            .start_watching(
                WatchKey::from_name("Some Guy"),
                summoner("Some Guy", 55, 77),
                channel("500"),
            )
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_secs(25)).await;
        let polls = source.recent_calls.load(Ordering::SeqCst);
        assert_eq!(polls, 2);

        supervisor.shutdown().await;
        assert_eq!(supervisor.worker_count().await, 0);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.recent_calls.load(Ordering::SeqCst), polls);
        // The registry survives shutdown for persistence.
        assert_eq!(supervisor.registry().len().await, 1);
    }
}
