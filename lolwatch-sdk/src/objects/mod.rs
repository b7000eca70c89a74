//! Request and response types for the Riot, Discord and Data Dragon APIs.
//!
//! Field names follow each service's JSON conventions; everything the
//! watcher does not read is left out.

pub mod ddragon;
pub mod discord;
pub mod riot;

pub use ddragon::{ChampionCatalog, ChampionDto, ChampionListDto};
pub use discord::{ChannelDto, CreateMessage, MessageDto};
pub use riot::{
    MatchDto, MatchReferenceDto, MatchlistDto, ParticipantDto, ParticipantIdentityDto,
    ParticipantStatsDto, ParticipantTimelineDto, PlayerDto, SummonerDto,
};
