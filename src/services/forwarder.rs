//! The forwarding step shared by both gateways: resolve the API key, make
//! one upstream call, map the outcome to a client response.

use crate::core::error::{AppError, ErrorStyle};
use crate::core::logging::get_request_id;
use crate::core::metrics::get_metrics;
use crate::core::secrets::SecretSource;
use crate::services::upstream::GeminiClient;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Upstream access with injected credentials.
#[derive(Clone)]
pub struct Forwarder {
    client: GeminiClient,
    secrets: Arc<dyn SecretSource>,
    api_key_var: String,
}

impl Forwarder {
    pub fn new(
        client: GeminiClient,
        secrets: Arc<dyn SecretSource>,
        api_key_var: impl Into<String>,
    ) -> Self {
        Self {
            client,
            secrets,
            api_key_var: api_key_var.into(),
        }
    }

    /// Look up the API key for this invocation.
    pub fn credential(&self) -> Result<String, AppError> {
        self.secrets.secret(&self.api_key_var).ok_or_else(|| {
            tracing::error!(
                request_id = %get_request_id(),
                secret = %self.api_key_var,
                "API key is not configured"
            );
            AppError::MissingCredential
        })
    }

    /// Forward `payload` and build the client response.
    ///
    /// Success relays the upstream JSON with status 200. Failures are logged
    /// here and rendered in `style`.
    pub async fn forward<P>(&self, gateway: &'static str, payload: &P, style: ErrorStyle) -> Response
    where
        P: Serialize + ?Sized,
    {
        match self.call(gateway, payload).await {
            Ok(body) => Json(body).into_response(),
            Err(err) => err.into_styled_response(style),
        }
    }

    async fn call<P>(&self, gateway: &'static str, payload: &P) -> Result<Value, AppError>
    where
        P: Serialize + ?Sized,
    {
        let api_key = self.credential()?;
        let metrics = get_metrics();
        let request_id = get_request_id();

        tracing::debug!(
            request_id = %request_id,
            gateway = gateway,
            "Forwarding request to Gemini"
        );

        let start = Instant::now();
        let result = self.client.generate_content(&api_key, payload).await;
        metrics
            .upstream_latency
            .with_label_values(&[gateway])
            .observe(start.elapsed().as_secs_f64());

        let outcome = match &result {
            Ok(_) => "success",
            Err(AppError::Upstream { status, body }) => {
                tracing::error!(
                    request_id = %request_id,
                    gateway = gateway,
                    status = %status,
                    body = %body,
                    "Gemini API returned an error"
                );
                "upstream_error"
            }
            Err(err) => {
                tracing::error!(
                    request_id = %request_id,
                    gateway = gateway,
                    error = %err,
                    "Gemini API call failed"
                );
                "transport_error"
            }
        };
        metrics
            .upstream_requests
            .with_label_values(&[gateway, outcome])
            .inc();

        result
    }
}
