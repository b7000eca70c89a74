//! Discord REST client.
//!
//! Only the two calls the watcher needs: look a channel up and post a
//! message into it. Authenticated as a bot user.

use reqwest::Client;
use url::Url;

use super::{ClientError, endpoint, parse_response};
use crate::objects::discord::{ChannelDto, CreateMessage, MessageDto};

pub const DEFAULT_DISCORD_API: &str = "https://discord.com/api/v10";

#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: Client,
    api_base: Url,
    authorization: String,
}

impl DiscordClient {
    /// Create a new `DiscordClient` for a bot token.
    ///
    /// The `Bot ` prefix is added here; pass the raw token.
    pub fn new(api_base: Url, bot_token: &str) -> Self {
        Self {
            http: Client::new(),
            api_base,
            authorization: format!("Bot {bot_token}"),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /channels/{channel.id}`
    pub async fn channel(&self, channel_id: &str) -> Result<ChannelDto, ClientError> {
        let url = endpoint(
            &self.api_base,
            &format!("channels/{}", urlencoding::encode(channel_id)),
        )?;

        let resp = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, &self.authorization)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `POST /channels/{channel.id}/messages`
    pub async fn create_message(
        &self,
        channel_id: &str,
        content: impl Into<String>,
    ) -> Result<MessageDto, ClientError> {
        let url = endpoint(
            &self.api_base,
            &format!("channels/{}/messages", urlencoding::encode(channel_id)),
        )?;

        let resp = self
            .http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, &self.authorization)
            .json(&CreateMessage {
                content: content.into(),
            })
            .send()
            .await?;

        parse_response(resp).await
    }
}
