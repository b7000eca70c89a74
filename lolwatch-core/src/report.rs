//! Turning a finished match into the message posted for a watch.

use crate::entities::{MatchDetail, MatchId, ParticipantStats, Summoner};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// The match detail does not list the summoner's account.
    #[error("account {account_id} not found in match {match_id}")]
    ParticipantNotFound { account_id: i64, match_id: MatchId },

    /// The account appears more than once in the participant identities.
    #[error("account {account_id} listed more than once in match {match_id}")]
    AmbiguousParticipant { account_id: i64, match_id: MatchId },

    /// The identity points at a participant id with no stats record.
    #[error("no stats for participant {participant_id} in match {match_id}")]
    StatsNotFound { participant_id: i32, match_id: MatchId },
}

/// Qualitative verdict on a summoner's game.
///
/// | win   | condition                        | outcome   |
/// |-------|----------------------------------|-----------|
/// | true  | deaths == 0 or kills >= 3×deaths | `Carried` |
/// | true  | otherwise                        | `Won`     |
/// | false | deaths >= kills + 5              | `Fed`     |
/// | false | otherwise                        | `Lost`    |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Carried,
    Won,
    Fed,
    Lost,
}

impl Outcome {
    pub fn classify(kills: u32, deaths: u32, win: bool) -> Self {
        if win {
            if deaths == 0 || kills >= deaths.saturating_mul(3) {
                Outcome::Carried
            } else {
                Outcome::Won
            }
        } else if deaths >= kills.saturating_add(5) {
            Outcome::Fed
        } else {
            Outcome::Lost
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            Outcome::Carried => "they hard carried that win",
            Outcome::Won => "they secured the win",
            Outcome::Fed => "they were feeding the other team",
            Outcome::Lost => "they took the loss",
        }
    }
}

/// A formatted report, ready to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub match_id: MatchId,
    pub outcome: Outcome,
    pub text: String,
}

/// Build the report for `summoner`'s part in `detail`.
pub fn build_report(summoner: &Summoner, detail: &MatchDetail) -> Result<Report, ReportError> {
    let mut identities = detail
        .identities
        .iter()
        .filter(|identity| identity.account_id == summoner.account_id);

    let Some(identity) = identities.next() else {
        return Err(ReportError::ParticipantNotFound {
            account_id: summoner.account_id,
            match_id: detail.match_id,
        });
    };
    if identities.next().is_some() {
        return Err(ReportError::AmbiguousParticipant {
            account_id: summoner.account_id,
            match_id: detail.match_id,
        });
    }

    let Some(participant) = detail
        .participants
        .iter()
        .find(|p| p.participant_id == identity.participant_id)
    else {
        return Err(ReportError::StatsNotFound {
            participant_id: identity.participant_id,
            match_id: detail.match_id,
        });
    };

    let ParticipantStats {
        kills,
        deaths,
        assists,
        win,
    } = participant.stats;
    let outcome = Outcome::classify(kills, deaths, win);

    let text = format!(
        "[{}] **{}** just went {}/{}/{} as __{}__, looks like {}",
        participant.lane,
        summoner.name,
        kills,
        deaths,
        assists,
        participant.champion,
        outcome.phrase()
    );

    Ok(Report {
        match_id: detail.match_id,
        outcome,
        text,
    })
}
