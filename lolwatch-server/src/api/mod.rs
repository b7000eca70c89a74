//! HTTP API handlers.
//!
//! # Endpoints
//!
//! - `GET  /watches`  – list watches and their last reported match
//! - `POST /watches`  – resolve a summoner and channel, start watching
//! - `POST /commands` – chat command entry point (`!leaguewatch`, `!help`)

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use lolwatch_core::entities::WatchKey;
use lolwatch_core::registry::{RegistryError, WatchEntry};
use lolwatch_core::sources::ResolveError;
use std::sync::Arc;
use thiserror::Error;

use crate::state::AppState;

mod commands;
mod watches;

#[cfg(test)]
mod test_support;

/// Build the API router, mounted under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/watches",
            get(watches::list_watches).post(watches::create_watch),
        )
        .route("/commands", post(commands::handle_command))
}

// ---------------------------------------------------------------------------
// Shared error type
// ---------------------------------------------------------------------------

/// Errors that can occur in API handlers.
///
/// The `Display` text doubles as the chat reply for command requests.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("Could not find that summoner: {0}")]
    SummonerNotFound(String),

    #[error("Could not find channel {0}")]
    ChannelNotFound(String),

    #[error("I'm already watching {0}")]
    AlreadyWatched(String),

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Upstream request failed: {0}")]
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::SummonerNotFound(_) | ApiError::ChannelNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AlreadyWatched(_) => StatusCode::CONFLICT,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream(e) => {
                tracing::error!(error = %e, "API upstream error");
                StatusCode::BAD_GATEWAY
            }
        };
        (status, self.to_string()).into_response()
    }
}

// ---------------------------------------------------------------------------
// Shared operations
// ---------------------------------------------------------------------------

/// Resolve `summoner_name` and `channel_id`, then start watching.
///
/// The watch key is derived from the summoner's canonical name as returned
/// by Riot.
pub(crate) async fn watch_summoner(
    state: &AppState,
    summoner_name: &str,
    channel_id: &str,
) -> Result<Arc<WatchEntry>, ApiError> {
    let summoner_name = summoner_name.trim();
    let channel_id = channel_id.trim();
    if summoner_name.is_empty() {
        return Err(ApiError::BadRequest("summoner_name must not be empty"));
    }
    if channel_id.is_empty() {
        return Err(ApiError::BadRequest("channel_id must not be empty"));
    }

    let timeout = state.request_timeout();

    let summoner = tokio::time::timeout(timeout, state.summoners.summoner_by_name(summoner_name))
        .await
        .map_err(|_| ApiError::Timeout)?
        .map_err(|e| match e {
            ResolveError::NotFound => ApiError::SummonerNotFound(summoner_name.to_string()),
            ResolveError::Timeout(_) => ApiError::Timeout,
            ResolveError::Failed(e) => ApiError::Upstream(e),
        })?;

    let channel = tokio::time::timeout(timeout, state.channels.resolve_channel(channel_id))
        .await
        .map_err(|_| ApiError::Timeout)?
        .map_err(|e| match e {
            ResolveError::NotFound => ApiError::ChannelNotFound(channel_id.to_string()),
            ResolveError::Timeout(_) => ApiError::Timeout,
            ResolveError::Failed(e) => ApiError::Upstream(e),
        })?;

    let key = WatchKey::from_name(&summoner.name);
    let name = summoner.name.to_string();
    state
        .supervisor
        .start_watching(key, summoner, channel)
        .await
        .map_err(|e| match e {
            RegistryError::AlreadyWatched(_) => {
                tracing::info!(summoner = %name, "Was asked to watch an already watched summoner");
                ApiError::AlreadyWatched(name)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::commands::CommandResponse;
    use super::test_support::{Directory, app_state};
    use super::watches::WatchResponse;
    use crate::server::build_router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn directory() -> Arc<Directory> {
        Arc::new(
            Directory::default()
                .with_summoner("Some Guy", 55)
                .with_channel("500"),
        )
    }

    #[tokio::test]
    async fn test_create_and_list_watch() {
        let state = app_state(directory());
        let app = build_router(state.clone());

        let response = app
            .clone()
            .oneshot(post(
                "/api/v1/watches",
                serde_json::json!({ "summoner_name": "some guy", "channel_id": "500" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: WatchResponse = body_json(response).await;
        assert_eq!(created.key, "someguy");
        assert_eq!(created.summoner_name, "Some Guy");
        assert_eq!(created.last_reported_match_id, 0);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/watches")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed: Vec<WatchResponse> = body_json(response).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].channel_id, "500");

        state.supervisor.shutdown().await;
    }

    #[tokio::test]
    async fn test_create_watch_errors() {
        let state = app_state(directory());
        let app = build_router(state.clone());

        let cases = [
            (
                serde_json::json!({ "summoner_name": "nobody", "channel_id": "500" }),
                StatusCode::NOT_FOUND,
            ),
            (
                serde_json::json!({ "summoner_name": "Some Guy", "channel_id": "999" }),
                StatusCode::NOT_FOUND,
            ),
            (
                serde_json::json!({ "summoner_name": " ", "channel_id": "500" }),
                StatusCode::BAD_REQUEST,
            ),
            (
                serde_json::json!({ "summoner_name": "Some Guy", "channel_id": "500" }),
                StatusCode::CREATED,
            ),
            (
                serde_json::json!({ "summoner_name": "SOME GUY", "channel_id": "500" }),
                StatusCode::CONFLICT,
            ),
        ];
        for (body, status) in cases {
            let response = app
                .clone()
                .oneshot(post("/api/v1/watches", body.clone()))
                .await
                .unwrap();
            assert_eq!(response.status(), status, "{body}");
        }
        assert_eq!(state.supervisor.worker_count().await, 1);

        state.supervisor.shutdown().await;
    }

    #[tokio::test]
    async fn test_commands() {
        let directory = directory();
        let state = app_state(directory.clone());
        let app = build_router(state.clone());

        let cases = [
            ("!leaguewatch Some Guy", Some("Now watching Some Guy")),
            ("!leaguewatch SOME GUY", Some("I'm already watching Some Guy")),
            ("!leaguewatch", Some(crate::commands::USAGE)),
            ("!help", Some(crate::commands::HELP)),
            ("good game", None),
        ];
        for (content, expected) in cases {
            let response = app
                .clone()
                .oneshot(post(
                    "/api/v1/commands",
                    serde_json::json!({ "channel_id": "500", "content": content }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let reply: CommandResponse = body_json(response).await;
            assert_eq!(reply.reply.as_deref(), expected, "{content}");
        }

        // Every reply is posted back to the channel; chatter is not.
        let sent = directory.sent();
        assert_eq!(sent.len(), 4);
        assert!(sent.iter().all(|(channel, _)| channel == "500"));

        state.supervisor.shutdown().await;
    }
}
