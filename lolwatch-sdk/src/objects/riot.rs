//! Riot API objects (summoner-v3 and match-v3).

use serde::{Deserialize, Serialize};

/// A summoner account as returned by the summoner endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    pub id: i64,
    pub account_id: i64,
    pub name: String,
    #[serde(default)]
    pub profile_icon_id: i64,
    #[serde(default)]
    pub summoner_level: i64,
    #[serde(default)]
    pub revision_date: i64,
}

/// Recent match list for an account.
///
/// The service returns the matches most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchlistDto {
    #[serde(default)]
    pub matches: Vec<MatchReferenceDto>,
    #[serde(default)]
    pub total_games: i32,
    #[serde(default)]
    pub start_index: i32,
    #[serde(default)]
    pub end_index: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReferenceDto {
    pub game_id: i64,
    #[serde(default)]
    pub champion: i64,
    #[serde(default)]
    pub queue: i32,
    #[serde(default)]
    pub season: i32,
    /// Epoch milliseconds.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub lane: String,
    #[serde(default)]
    pub platform_id: String,
}

/// Full detail of a single match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub game_id: i64,
    /// Seconds.
    #[serde(default)]
    pub game_duration: i64,
    /// Epoch milliseconds.
    #[serde(default)]
    pub game_creation: i64,
    #[serde(default)]
    pub queue_id: i32,
    #[serde(default)]
    pub participant_identities: Vec<ParticipantIdentityDto>,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantIdentityDto {
    pub participant_id: i32,
    pub player: PlayerDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub account_id: i64,
    #[serde(default)]
    pub summoner_id: i64,
    #[serde(default)]
    pub summoner_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub participant_id: i32,
    #[serde(default)]
    pub team_id: i32,
    pub champion_id: i64,
    pub stats: ParticipantStatsDto,
    #[serde(default)]
    pub timeline: ParticipantTimelineDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStatsDto {
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub win: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantTimelineDto {
    #[serde(default)]
    pub lane: String,
    #[serde(default)]
    pub role: String,
}
