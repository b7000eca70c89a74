//! New-match detection.

use crate::entities::{MatchId, MatchSummary};

/// What a poll of the recent match list means for a watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// The summoner has no recent matches.
    NoMatches,
    /// The most recent match is the one already reported.
    Unchanged(MatchId),
    /// The most recent match has not been reported yet.
    NewMatch(MatchId),
}

/// Compare the most recent match with the last one reported.
///
/// `recent` must be ordered most recent first; the match source guarantees
/// this and it is not re-derived here. Only the head of the list matters:
/// older unreported matches are never reported.
pub fn detect_new_match(last_reported: MatchId, recent: &[MatchSummary]) -> Detection {
    match recent.first() {
        None => Detection::NoMatches,
        Some(latest) if latest.match_id == last_reported => Detection::Unchanged(latest.match_id),
        Some(latest) => Detection::NewMatch(latest.match_id),
    }
}
