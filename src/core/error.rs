//! Error types and handling for the Gemini gateway.
//!
//! This module provides a unified error type [`AppError`]. The two gateways
//! expose failures differently, so rendering goes through an [`ErrorStyle`]
//! chosen by the handler.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned to analysis clients when the upstream call fails.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch from Gemini API.";

/// Message returned to analysis clients for unexpected failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Message returned when the API key is not provisioned.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "Server configuration error: API key is not set.";

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Inbound request used a method other than POST
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Client provided invalid data
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// API key absent from the secret source
    #[error("{}", MISSING_CREDENTIAL_MESSAGE)]
    MissingCredential,

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status}")]
    Upstream { status: StatusCode, body: String },

    /// HTTP request errors from the reqwest client
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal server errors with custom message
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// How an [`AppError`] is presented to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStyle {
    /// Plain-text bodies; upstream error bodies are relayed verbatim.
    PlainText,
    /// `{"error": message}` bodies; upstream detail is suppressed.
    Structured,
}

impl AppError {
    /// Status code the client receives for this error.
    pub fn status(&self, style: ErrorStyle) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::BadRequest(_) => match style {
                ErrorStyle::Structured => StatusCode::BAD_REQUEST,
                // The generic gateway has no validation step; parse
                // failures land in the catch-all.
                ErrorStyle::PlainText => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Upstream { status, .. } => *status,
            AppError::MissingCredential
            | AppError::Request(_)
            | AppError::Serialization(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render the error as a response in the given style.
    pub fn into_styled_response(self, style: ErrorStyle) -> Response {
        let status = self.status(style);
        match style {
            ErrorStyle::PlainText => {
                let body = match self {
                    AppError::Upstream { body, .. } => body,
                    other => other.to_string(),
                };
                let mut response = (status, body).into_response();
                if status == StatusCode::METHOD_NOT_ALLOWED {
                    response
                        .headers_mut()
                        .insert(header::ALLOW, header::HeaderValue::from_static("POST"));
                }
                response
            }
            ErrorStyle::Structured => {
                let message = match self {
                    AppError::MethodNotAllowed => "Method not allowed.".to_string(),
                    AppError::BadRequest(msg) => msg,
                    AppError::MissingCredential => MISSING_CREDENTIAL_MESSAGE.to_string(),
                    AppError::Upstream { .. } => UPSTREAM_FAILURE_MESSAGE.to_string(),
                    AppError::Request(_) | AppError::Serialization(_) | AppError::Internal(_) => {
                        INTERNAL_ERROR_MESSAGE.to_string()
                    }
                };
                (status, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_styled_response(ErrorStyle::Structured)
    }
}

/// Convenience type alias for Results using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
