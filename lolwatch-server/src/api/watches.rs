use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use lolwatch_core::registry::WatchEntry;
use serde::{Deserialize, Serialize};

use super::{ApiError, watch_summoner};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct CreateWatchRequest {
    pub summoner_name: String,
    pub channel_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WatchResponse {
    pub key: String,
    pub summoner_name: String,
    pub summoner_id: i64,
    pub channel_id: String,
    /// `0` until the first report goes out.
    pub last_reported_match_id: i64,
}

impl WatchResponse {
    async fn from_entry(entry: &WatchEntry) -> Self {
        Self {
            key: entry.key().to_string(),
            summoner_name: entry.summoner().name.to_string(),
            summoner_id: entry.summoner().id,
            channel_id: entry.channel().id.to_string(),
            last_reported_match_id: entry.last_reported().await.0,
        }
    }
}

/// `GET /watches`: every watch, ordered by key.
pub(crate) async fn list_watches(State(state): State<AppState>) -> impl IntoResponse {
    let entries = state.supervisor.registry().snapshot().await;
    let mut watches = Vec::with_capacity(entries.len());
    for entry in &entries {
        watches.push(WatchResponse::from_entry(entry).await);
    }
    Json(watches)
}

/// `POST /watches`: resolve the summoner and channel and start watching.
pub(crate) async fn create_watch(
    State(state): State<AppState>,
    Json(payload): Json<CreateWatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = watch_summoner(&state, &payload.summoner_name, &payload.channel_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(WatchResponse::from_entry(&entry).await),
    ))
}
