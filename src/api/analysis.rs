//! Structured analysis gateway: turns `{lang, coins}` into a grounded,
//! schema-constrained Gemini request.

use crate::api::state::AppState;
use crate::core::error::{AppError, ErrorStyle};
use crate::services::{build_analysis_request, Language};
use axum::{extract::State, response::Response};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;

const GATEWAY: &str = "analysis";

pub const INVALID_JSON_MESSAGE: &str = "Request body must be valid JSON.";
pub const MISSING_COINS_MESSAGE: &str = "A non-empty 'coins' array is required.";
pub const NON_STRING_COIN_MESSAGE: &str = "Every entry in 'coins' must be a string.";

/// Validated analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub lang: Language,
    pub coins: Vec<String>,
}

impl AnalysisRequest {
    /// Validate a decoded request body.
    ///
    /// `coins` must be a non-empty array of strings. `lang` is never
    /// rejected; see [`Language::from_code`].
    pub fn from_value(body: &Value) -> Result<Self, AppError> {
        let coins = body
            .get("coins")
            .and_then(Value::as_array)
            .filter(|coins| !coins.is_empty())
            .ok_or_else(|| AppError::BadRequest(MISSING_COINS_MESSAGE.to_string()))?;

        let coins = coins
            .iter()
            .map(|coin| coin.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| AppError::BadRequest(NON_STRING_COIN_MESSAGE.to_string()))?;

        let lang = Language::from_code(body.get("lang").and_then(Value::as_str));

        Ok(Self { lang, coins })
    }
}

/// Analyze the requested coins.
///
/// Bound to POST only. Upstream failures are logged and reported to the
/// client with a fixed message and the upstream status code.
pub async fn analyze_coins(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request = match serde_json::from_slice::<Value>(&body)
        .map_err(|_| AppError::BadRequest(INVALID_JSON_MESSAGE.to_string()))
        .and_then(|value| AnalysisRequest::from_value(&value))
    {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(error = %err, "Rejecting analysis request");
            return err.into_styled_response(ErrorStyle::Structured);
        }
    };

    tracing::debug!(
        lang = %request.lang,
        coin_count = request.coins.len(),
        "Building coin analysis request"
    );

    let payload = build_analysis_request(request.lang, &request.coins);

    state
        .forwarder
        .forward(GATEWAY, &payload, ErrorStyle::Structured)
        .await
}
