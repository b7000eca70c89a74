use axum::{Json, extract::State};
use lolwatch_core::entities::ReportChannel;
use serde::{Deserialize, Serialize};

use super::watch_summoner;
use crate::commands::{self, Command};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct CommandRequest {
    pub channel_id: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CommandResponse {
    /// `None` when the message was not a command.
    pub reply: Option<String>,
}

/// `POST /commands`: handle a chat message from a channel.
///
/// The reply is returned and also posted back to the channel. Posting is
/// best effort; a failure is only logged.
pub(crate) async fn handle_command(
    State(state): State<AppState>,
    Json(payload): Json<CommandRequest>,
) -> Json<CommandResponse> {
    let reply = match commands::parse(&payload.content) {
        None => return Json(CommandResponse { reply: None }),
        Some(Command::Help) => commands::HELP.to_string(),
        Some(Command::Usage) => {
            tracing::debug!(content = %payload.content, "Ignoring an unrecognized command");
            commands::USAGE.to_string()
        }
        Some(Command::Watch { summoner_name }) => {
            match watch_summoner(&state, summoner_name, &payload.channel_id).await {
                Ok(entry) => format!("Now watching {}", entry.summoner().name),
                Err(e) => {
                    tracing::info!(summoner = summoner_name, error = %e, "Watch command failed");
                    e.to_string()
                }
            }
        }
    };

    post_reply(&state, &payload.channel_id, &reply).await;
    Json(CommandResponse { reply: Some(reply) })
}

async fn post_reply(state: &AppState, channel_id: &str, reply: &str) {
    let channel = ReportChannel {
        id: channel_id.into(),
        name: channel_id.into(),
    };
    match tokio::time::timeout(state.request_timeout(), state.notifier.send(&channel, reply)).await
    {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(channel = channel_id, error = %e, "Failed to post reply"),
        Err(_) => tracing::warn!(channel = channel_id, "Posting reply timed out"),
    }
}
