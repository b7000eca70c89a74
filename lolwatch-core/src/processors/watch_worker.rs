//! WatchWorker processor.
//!
//! One WatchWorker runs per registry entry. Every poll interval it:
//! - Fetches the summoner's recent match list
//! - Compares the most recent match with the last one reported
//! - Fetches the detail of a new match and builds the report
//! - Delivers the report and only then advances `last_reported`
//!
//! Any failure abandons the cycle without touching the entry, so the same
//! match is retried on the next tick until it is delivered or superseded.

use crate::config::WatchSettings;
use crate::detector::{Detection, detect_new_match};
use crate::entities::MatchId;
use crate::registry::WatchEntry;
use crate::report::{ReportError, build_report};
use crate::sources::{MatchSource, Notifier, NotifyError, SourceError};
use kanau::processor::Processor;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Semaphore, watch};
use tracing::{debug, error, info, warn};

/// One scheduled poll of a watch.
#[derive(Debug, Clone, Copy)]
pub struct PollTick;

/// How a cycle ended when nothing went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The recent match list was empty.
    NoMatches,
    /// The most recent match was already reported.
    Unchanged,
    /// A new match was reported and recorded.
    Reported(MatchId),
}

/// Why a cycle was abandoned. None of these advance the entry.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("fetching recent matches failed: {0}")]
    Fetch(#[source] SourceError),

    #[error("fetching match {match_id} failed: {source}")]
    Detail {
        match_id: MatchId,
        #[source]
        source: SourceError,
    },

    #[error("building report failed: {0}")]
    Report(#[from] ReportError),

    #[error("delivering report for match {match_id} failed: {source}")]
    Delivery {
        match_id: MatchId,
        #[source]
        source: NotifyError,
    },

    #[error("shutting down")]
    ShuttingDown,
}

/// The poll/detect/report loop of a single watch.
pub struct WatchWorker {
    entry: Arc<WatchEntry>,
    source: Arc<dyn MatchSource>,
    notifier: Arc<dyn Notifier>,
    settings: WatchSettings,
    /// Shared by all workers; bounds concurrent upstream traffic.
    permits: Arc<Semaphore>,
}

impl WatchWorker {
    pub fn new(
        entry: Arc<WatchEntry>,
        source: Arc<dyn MatchSource>,
        notifier: Arc<dyn Notifier>,
        settings: WatchSettings,
        permits: Arc<Semaphore>,
    ) -> Self {
        Self {
            entry,
            source,
            notifier,
            settings,
            permits,
        }
    }

    /// Run until the shutdown flag turns `true` or its sender is dropped.
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        let key = self.entry.key().clone();
        info!(%key, summoner = %self.entry.summoner().name, "WatchWorker started");

        while !*shutdown_rx.borrow() {
            tokio::select! {
                biased;

                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }

                _ = tokio::time::sleep(self.settings.poll_interval) => {
                    match self.process(PollTick).await {
                        Ok(CycleOutcome::Reported(match_id)) => {
                            info!(%key, %match_id, "Reported new match");
                        }
                        Ok(outcome) => {
                            debug!(%key, ?outcome, "Poll cycle finished");
                        }
                        Err(e) => self.log_cycle_error(&e),
                    }
                }
            }
        }

        info!(%key, "WatchWorker shutdown complete");
    }

    fn log_cycle_error(&self, e: &CycleError) {
        let key = self.entry.key();
        match e {
            // Transient by assumption; the next tick retries.
            CycleError::Fetch(_) => debug!(%key, error = %e, "Skipping poll cycle"),
            CycleError::Detail { .. } | CycleError::Report(_) => {
                warn!(%key, error = %e, "Abandoning poll cycle")
            }
            CycleError::Delivery { .. } => {
                error!(%key, channel = %self.entry.channel().name, error = %e, "Abandoning poll cycle")
            }
            CycleError::ShuttingDown => debug!(%key, "Poll cycle cancelled by shutdown"),
        }
    }

    async fn cycle(&self) -> Result<CycleOutcome, CycleError> {
        let timeout = self.settings.request_timeout;

        let recent = tokio::time::timeout(timeout, self.source.recent_matches(self.entry.summoner()))
            .await
            .map_err(|_| CycleError::Fetch(SourceError::Timeout(timeout)))?
            .map_err(CycleError::Fetch)?;

        let last_reported = self.entry.last_reported().await;
        let match_id = match detect_new_match(last_reported, &recent) {
            Detection::NoMatches => return Ok(CycleOutcome::NoMatches),
            Detection::Unchanged(_) => return Ok(CycleOutcome::Unchanged),
            Detection::NewMatch(match_id) => match_id,
        };

        debug!(key = %self.entry.key(), %match_id, %last_reported, "New match detected");

        let detail = tokio::time::timeout(timeout, self.source.match_detail(match_id))
            .await
            .map_err(|_| CycleError::Detail {
                match_id,
                source: SourceError::Timeout(timeout),
            })?
            .map_err(|source| CycleError::Detail { match_id, source })?;

        let report = build_report(self.entry.summoner(), &detail)?;

        tokio::time::timeout(timeout, self.notifier.send(self.entry.channel(), &report.text))
            .await
            .map_err(|_| CycleError::Delivery {
                match_id,
                source: NotifyError::Timeout(timeout),
            })?
            .map_err(|source| CycleError::Delivery { match_id, source })?;

        self.entry.mark_reported(match_id).await;
        Ok(CycleOutcome::Reported(match_id))
    }
}

impl Processor<PollTick> for WatchWorker {
    type Output = CycleOutcome;
    type Error = CycleError;

    async fn process(&self, _tick: PollTick) -> Result<CycleOutcome, CycleError> {
        let Ok(_permit) = self.permits.acquire().await else {
            return Err(CycleError::ShuttingDown);
        };
        self.cycle().await
    }
}
