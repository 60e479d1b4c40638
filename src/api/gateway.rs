//! Generic gateway: relays any JSON body to Gemini with the server's key.

use crate::api::state::AppState;
use crate::core::error::{AppError, ErrorStyle};
use axum::{extract::State, http::Method, response::Response};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;

const GATEWAY: &str = "generic";

/// Forward an arbitrary JSON body.
///
/// Non-POST requests get a plain-text 405 before anything else happens.
/// Upstream error bodies are passed back verbatim with the upstream status.
pub async fn proxy_gemini(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Response {
    if method != Method::POST {
        return AppError::MethodNotAllowed.into_styled_response(ErrorStyle::PlainText);
    }

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting request body that is not JSON");
            return AppError::from(e).into_styled_response(ErrorStyle::PlainText);
        }
    };

    state
        .forwarder
        .forward(GATEWAY, &payload, ErrorStyle::PlainText)
        .await
}
