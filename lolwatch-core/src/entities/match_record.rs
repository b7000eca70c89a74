//! Match data as the watcher sees it.
//!
//! These are trimmed-down views of the Riot match objects. Champion ids are
//! resolved to display names while converting, so report building never has
//! to touch static data.

use compact_str::CompactString;
use lolwatch_sdk::objects::{MatchDto, MatchReferenceDto};

use super::MatchId;

/// One entry of a summoner's recent match list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub match_id: MatchId,
}

impl From<MatchReferenceDto> for MatchSummary {
    fn from(dto: MatchReferenceDto) -> Self {
        Self {
            match_id: MatchId(dto.game_id),
        }
    }
}

/// Full detail of a finished match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDetail {
    pub match_id: MatchId,
    pub identities: Vec<ParticipantIdentity>,
    pub participants: Vec<Participant>,
}

/// Links a participant slot in a match to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantIdentity {
    pub participant_id: i32,
    pub account_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub participant_id: i32,
    pub champion: CompactString,
    pub lane: CompactString,
    pub stats: ParticipantStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantStats {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub win: bool,
}

impl MatchDetail {
    /// Convert a Riot match object, naming champions with `champion_name`.
    pub fn from_dto(dto: MatchDto, champion_name: impl Fn(i64) -> String) -> Self {
        let identities = dto
            .participant_identities
            .into_iter()
            .map(|p| ParticipantIdentity {
                participant_id: p.participant_id,
                account_id: p.player.account_id,
            })
            .collect();

        let participants = dto
            .participants
            .into_iter()
            .map(|p| Participant {
                participant_id: p.participant_id,
                champion: champion_name(p.champion_id).into(),
                lane: p.timeline.lane.into(),
                stats: ParticipantStats {
                    kills: p.stats.kills,
                    deaths: p.stats.deaths,
                    assists: p.stats.assists,
                    win: p.stats.win,
                },
            })
            .collect();

        Self {
            match_id: MatchId(dto.game_id),
            identities,
            participants,
        }
    }
}
