//! Startup restore and shutdown persistence.
//!
//! Neither path is allowed to take the process down: a missing or broken
//! state file means starting empty, and a failed save is logged on the way
//! out.

use crate::persistence::{self, PersistError, StateFile};
use crate::registry::WatchRegistry;
use crate::sources::{ChannelResolver, SummonerResolver};
use std::time::Duration;
use tracing::{info, warn};

/// Restore the registry from `state_file`, falling back to an empty one.
pub async fn restore_registry(
    state_file: &StateFile,
    summoners: &dyn SummonerResolver,
    channels: &dyn ChannelResolver,
    timeout: Duration,
) -> WatchRegistry {
    let bytes = match state_file.read().await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            info!(path = %state_file.path().display(), "No saved state, starting with no watches");
            return WatchRegistry::new();
        }
        Err(e) => {
            warn!(
                path = %state_file.path().display(),
                error = %e,
                "Could not read saved state, proceeding with empty state"
            );
            return WatchRegistry::new();
        }
    };

    match persistence::load(&bytes, summoners, channels, timeout).await {
        Ok(report) => {
            for (key, e) in &report.failures {
                warn!(%key, error = %e, "Dropping saved watch that could not be restored");
            }
            let restored = report.registry.len().await;
            info!(
                restored,
                dropped = report.failures.len(),
                "Loaded saved state"
            );
            report.registry
        }
        Err(e) => {
            warn!(
                path = %state_file.path().display(),
                error = %e,
                "Could not load saved state, proceeding with empty state"
            );
            WatchRegistry::new()
        }
    }
}

/// Flatten `registry` and write it to `state_file`.
///
/// Errors are logged here and also returned for callers that care.
pub async fn persist_registry(
    registry: &WatchRegistry,
    state_file: &StateFile,
) -> Result<(), PersistError> {
    let records = persistence::flatten(registry).await;
    match state_file.save(&records).await {
        Ok(()) => {
            info!(
                path = %state_file.path().display(),
                watches = records.len(),
                "Saved state"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                path = %state_file.path().display(),
                error = %e,
                "Could not save state"
            );
            Err(e)
        }
    }
}
