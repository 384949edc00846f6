//! HTTP request handlers

use super::types::Update;
use super::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};

/// Create the webhook router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // The bot token in the path is the shared secret: Telegram is the
        // only party that knows the full URL.
        .route("/webhook/:token", post(webhook))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn webhook(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if token != state.bot_token {
        return StatusCode::NOT_FOUND;
    }

    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if !is_json {
        return StatusCode::FORBIDDEN;
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(error) => {
            // Acknowledge anyway: a payload that fails to parse now will
            // not parse on redelivery either.
            tracing::warn!(%error, "discarding malformed update payload");
            return StatusCode::OK;
        }
    };

    state.dispatcher.process_update(update).await;
    StatusCode::OK
}
