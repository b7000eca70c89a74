//! Identity of a watched summoner and of the channel reports go to.
//!
//! Both are resolved through live lookups (at watch creation or on load)
//! and never mutated afterwards.

use compact_str::CompactString;
use lolwatch_sdk::objects::{ChannelDto, SummonerDto};

/// A summoner account being watched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summoner {
    /// Summoner id; the value persisted in the state file.
    pub id: i64,
    /// Account id; identifies the summoner inside match data.
    pub account_id: i64,
    pub name: CompactString,
}

impl From<SummonerDto> for Summoner {
    fn from(dto: SummonerDto) -> Self {
        Self {
            id: dto.id,
            account_id: dto.account_id,
            name: dto.name.into(),
        }
    }
}

/// Where reports for a watch are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportChannel {
    pub id: CompactString,
    /// Only used for logging.
    pub name: CompactString,
}

impl From<ChannelDto> for ReportChannel {
    fn from(dto: ChannelDto) -> Self {
        let name = dto.name.unwrap_or_else(|| dto.id.clone());
        Self {
            id: dto.id.into(),
            name: name.into(),
        }
    }
}
