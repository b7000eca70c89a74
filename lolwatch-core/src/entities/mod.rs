pub mod match_record;
pub mod summoner;

pub use match_record::{MatchDetail, MatchSummary, Participant, ParticipantIdentity, ParticipantStats};
pub use summoner::{ReportChannel, Summoner};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Identifier of a match as assigned by the match-data service.
///
/// Only compared for equality; ids are never assumed to increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub i64);

impl MatchId {
    /// Sentinel for "nothing reported yet". The match service never issues 0.
    pub const NONE: MatchId = MatchId(0);
}

impl Default for MatchId {
    fn default() -> Self {
        Self::NONE
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry key of a watch: the normalized summoner name.
///
/// Normalization follows the Riot rule (lowercase, whitespace removed), so
/// `"Some Guy"` and `"someguy"` name the same watch. Keys read back from a
/// state file are normalized too.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "CompactString", into = "CompactString")]
pub struct WatchKey(CompactString);

impl WatchKey {
    pub fn from_name(name: &str) -> Self {
        Self(
            name.chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CompactString> for WatchKey {
    fn from(value: CompactString) -> Self {
        Self::from_name(&value)
    }
}

impl From<WatchKey> for CompactString {
    fn from(value: WatchKey) -> Self {
        value.0
    }
}

impl std::fmt::Display for WatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
