//! Runtime settings for the watch engine.
//!
//! These are the validated values; parsing and defaults for the config file
//! live in the server crate.

use std::path::PathBuf;
use std::time::Duration;

/// Default state file, relative to the working directory.
pub const DEFAULT_STATE_PATH: &str = "./botdata.json";

/// Timing and concurrency knobs shared by every worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSettings {
    /// Sleep between two polls of the same watch.
    pub poll_interval: Duration,
    /// Deadline for each upstream call (match list, match detail, delivery,
    /// and the resolver calls made while loading).
    pub request_timeout: Duration,
    /// How many poll cycles may talk to upstream services at once.
    pub max_concurrent_polls: usize,
    /// How long shutdown waits for workers before aborting them.
    pub shutdown_grace: Duration,
    pub state_path: PathBuf,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            request_timeout: Duration::from_secs(5),
            max_concurrent_polls: 16,
            shutdown_grace: Duration::from_secs(10),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
        }
    }
}
