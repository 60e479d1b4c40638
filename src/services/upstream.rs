//! HTTP client for the Gemini `generateContent` endpoint.

use crate::core::config::AppConfig;
use crate::core::{AppError, Result};
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::time::Duration;

/// Client for a single upstream model endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Build a client with connection pooling from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.upstream.verify_ssl)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60));

        if let Some(secs) = config.upstream.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder.build().map_err(|e| AppError::from(e.without_url()))?;
        Ok(Self::new(http, config.generate_content_url()))
    }

    /// Endpoint URL without the key parameter.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue exactly one `generateContent` call.
    ///
    /// The key travels as the `key` query parameter. Transport errors are
    /// stripped of their URL so the key cannot leak through error text.
    pub async fn generate_content<P>(&self, api_key: &str, payload: &P) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(&self.url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!(
                    url = %self.url,
                    error = %e,
                    error_source = ?e.source(),
                    is_timeout = e.is_timeout(),
                    is_connect = e.is_connect(),
                    "HTTP request failed to upstream"
                );
                AppError::from(e)
            })?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);

        tracing::debug!(
            url = %self.url,
            status = %status,
            method = "POST",
            "HTTP request completed"
        );

        let body = response
            .text()
            .await
            .map_err(|e| AppError::from(e.without_url()))?;

        if !status.is_success() {
            return Err(AppError::Upstream { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
