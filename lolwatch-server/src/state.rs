//! Application state shared across all request handlers.

use crate::adapters::SummonerDirectory;
use lolwatch_core::processors::WatchSupervisor;
use lolwatch_core::sources::{ChannelResolver, Notifier};
use std::sync::Arc;
use std::time::Duration;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Owns the registry and the per-watch workers.
    pub supervisor: Arc<WatchSupervisor>,
    pub summoners: Arc<dyn SummonerDirectory>,
    pub channels: Arc<dyn ChannelResolver>,
    /// Used for chat command replies.
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(
        supervisor: Arc<WatchSupervisor>,
        summoners: Arc<dyn SummonerDirectory>,
        channels: Arc<dyn ChannelResolver>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            supervisor,
            summoners,
            channels,
            notifier,
        }
    }

    /// Deadline for each upstream call made on behalf of a request.
    pub fn request_timeout(&self) -> Duration {
        self.supervisor.settings().request_timeout
    }
}
