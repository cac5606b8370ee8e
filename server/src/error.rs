//! Error translation at the HTTP boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use folio_retrieval::RetrievalError;

/// The generic user-facing failure message. Provider and internal detail
/// never crosses the HTTP boundary.
const MEMORY_TROUBLE: &str = "I'm having trouble accessing my memory right now.";

/// Errors a chat request can end in.
///
/// Each variant carries enough detail for the server-side log; the HTTP
/// response only ever sees a generic message.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The provider credential is absent.
    #[error("provider credential is not configured")]
    Config,

    /// The request body was malformed or missing the question.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The retrieval pipeline failed.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Config => {
                error!("chat request failed: {self}");
                MEMORY_TROUBLE
            }
            ApiError::Validation(_) => {
                warn!("chat request rejected: {self}");
                "Please send a JSON body with a \"question\" field."
            }
            ApiError::Retrieval(_) => {
                error!("chat request failed: {self}");
                MEMORY_TROUBLE
            }
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": message })),
        )
            .into_response()
    }
}
