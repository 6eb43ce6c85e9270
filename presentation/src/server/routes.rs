//! API routes

use super::AppState;
use super::dto::{ChatRequest, ChatResponse, HealthResponse};
use super::error::ApiError;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use serde_json::Value;
use std::sync::Arc;
use toolchat_application::RunChatInput;
use tracing::{info, warn};

pub fn chat_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/chat", post(chat))
}

pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "toolchat backend is running",
    })
}

/// `POST /api/chat`: one orchestrator run per request.
///
/// The body is validated before any model session is opened.
async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(body) = body?;
    let request = ChatRequest::from_json(&body).map_err(|message| {
        warn!("Rejected chat request: {}", message);
        ApiError::validation(message)
    })?;

    info!(history = request.history.len(), "Chat request");

    let input = RunChatInput::new(
        request.history,
        request.last_message,
        state.execution.clone(),
    );
    let output = state.run_chat.execute(input).await?;

    Ok(Json(ChatResponse {
        reply: output.reply,
        model: output.model,
    }))
}
