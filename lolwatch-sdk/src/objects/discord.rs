//! Discord REST objects.

use serde::{Deserialize, Serialize};

/// A channel as returned by `GET /channels/{channel.id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDto {
    /// Snowflake id, serialized as a string by Discord.
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: u8,
    /// Absent for DM channels.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub guild_id: Option<String>,
}

/// Body of `POST /channels/{channel.id}/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMessage {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub channel_id: String,
}
