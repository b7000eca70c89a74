//! Long-running processors of the watch engine.
//!
//! - `WatchWorker`: one per watch, runs the poll/detect/report cycle
//! - `WatchSupervisor`: owns the registry and spawns, tracks and stops workers

pub mod supervisor;
pub mod watch_worker;

pub use supervisor::WatchSupervisor;
pub use watch_worker::{CycleError, CycleOutcome, PollTick, WatchWorker};
