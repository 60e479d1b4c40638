//! Shared helpers for gateway integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use gemini_gateway::{
    core::{init_metrics, AppConfig, StaticSecrets},
    router, AppState, GeminiClient,
};
use serde_json::Value;
use std::sync::Arc;
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";
pub const MODEL: &str = "gemini-test";
pub const MODEL_PATH: &str = "/v1beta/models/gemini-test:generateContent";

fn test_config(mock_server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.upstream.api_base = format!("{}/v1beta", mock_server.uri());
    config.upstream.model = MODEL.to_string();
    config
}

fn build_app(mock_server: &MockServer, secrets: StaticSecrets) -> Router {
    init_metrics();

    let config = test_config(mock_server);
    let client = GeminiClient::new(reqwest::Client::new(), config.generate_content_url());
    let state = Arc::new(AppState::new(&config, client, Arc::new(secrets)));
    router(state)
}

/// App whose secret source holds the API key.
pub fn create_test_app(mock_server: &MockServer) -> Router {
    build_app(
        mock_server,
        StaticSecrets::new().with("GEMINI_API_KEY", API_KEY),
    )
}

/// App whose secret source is empty.
pub fn create_test_app_without_key(mock_server: &MockServer) -> Router {
    build_app(mock_server, StaticSecrets::new())
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn raw_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Sample `generateContent` success body.
pub fn gemini_success_body() -> Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{"text": "[{\"coinName\":\"Bitcoin\"}]"}],
                "role": "model"
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 10,
            "candidatesTokenCount": 20,
            "totalTokenCount": 30
        }
    })
}
