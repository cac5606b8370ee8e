//! Router and request handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use folio_embeddings::GeminiEmbeddings;
use folio_generation::GeminiChat;
use folio_retrieval::RagEngine;

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Shared state for the chat server.
///
/// The engine is `None` when the provider credential was absent at
/// startup: the process still serves, and every chat request then fails
/// with a configuration error instead of crashing the handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Option<Arc<RagEngine>>,
}

impl AppState {
    /// Build the state from configuration, wiring the hosted providers
    /// over the fixed knowledge document.
    pub fn from_config(config: &ServerConfig) -> Self {
        let engine = config.api_key.as_deref().map(|api_key| {
            let mut embeddings = GeminiEmbeddings::new().with_api_key(api_key);
            let mut generator = GeminiChat::new().with_api_key(api_key);
            if let Some(base_url) = config.provider_base_url.as_deref() {
                embeddings = embeddings.with_base_url(base_url);
                generator = generator.with_base_url(base_url);
            }
            Arc::new(RagEngine::new(
                folio_knowledge::ABOUT_ME,
                Arc::new(embeddings),
                Arc::new(generator),
            ))
        });

        Self { engine }
    }
}

/// A successful chat reply.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Build the Axum router with all routes.
///
/// CORS is permissive: any origin may `POST /api/chat` with a
/// `Content-Type` header, and preflight `OPTIONS` requests are answered by
/// the layer with the matching allow headers.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/chat", post(chat).options(preflight))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// Liveness probe.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Non-preflight `OPTIONS` requests get an empty 200; real preflights are
/// short-circuited by the CORS layer before reaching this handler.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Answer a question about the knowledge document.
///
/// The body is parsed leniently: anything that is not a JSON object with a
/// non-empty string `question` is a validation failure, reported with the
/// same shape (and status) as every other failure.
async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Json<ChatResponse>, ApiError> {
    let value: Value = serde_json::from_slice(&body)
        .map_err(|source| ApiError::Validation(format!("body is not valid JSON: {source}")))?;

    let question = value
        .get("question")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|question| !question.is_empty())
        .ok_or_else(|| ApiError::Validation("missing \"question\" field".to_string()))?;

    let engine = state.engine.as_ref().ok_or(ApiError::Config)?;

    debug!("answering chat question of {} chars", question.len());
    let answer = engine.answer(question).await?;

    Ok(Json(ChatResponse { answer }))
}
