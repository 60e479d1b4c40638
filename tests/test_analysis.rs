//! Integration tests for the structured analysis gateway.

mod common;

use axum::http::StatusCode;
use common::*;
use gemini_gateway::services::{build_analysis_request, coin_analysis_schema, Language};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const UPSTREAM_FAILURE: &str = "Failed to fetch from Gemini API.";

async fn mount_success(mock_server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_success_body()))
        .expect(expected_calls)
        .mount(mock_server)
        .await;
}

async fn sent_payload(mock_server: &MockServer) -> Value {
    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    serde_json::from_slice(&received[0].body).unwrap()
}

#[tokio::test]
async fn test_invalid_coins_return_400_without_upstream_call() {
    let mock_server = MockServer::start().await;
    mount_success(&mock_server, 0).await;

    for body in [
        json!({"lang": "en"}),
        json!({"lang": "en", "coins": "BTC"}),
        json!({"lang": "ko", "coins": []}),
        json!({"coins": 3}),
    ] {
        let app = create_test_app(&mock_server);
        let response = app
            .oneshot(json_request("POST", "/api/analyze", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        let json = body_json(response).await;
        assert!(json["error"].is_string(), "{body}");
        assert_eq!(json.as_object().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let mock_server = MockServer::start().await;
    mount_success(&mock_server, 0).await;

    let app = create_test_app(&mock_server);
    let response = app
        .oneshot(raw_request("POST", "/api/analyze", "coins=BTC"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_only_post_is_routed() {
    let mock_server = MockServer::start().await;
    mount_success(&mock_server, 0).await;

    let app = create_test_app(&mock_server);
    let response = app
        .oneshot(json_request("GET", "/api/analyze", &json!({"coins": ["BTC"]})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_missing_key_returns_structured_500() {
    let mock_server = MockServer::start().await;
    mount_success(&mock_server, 0).await;

    let app = create_test_app_without_key(&mock_server);
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/analyze",
            &json!({"lang": "en", "coins": ["BTC"]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].is_string());
    assert!(!json["error"].as_str().unwrap().contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn test_success_relays_upstream_body() {
    let mock_server = MockServer::start().await;
    mount_success(&mock_server, 1).await;

    let app = create_test_app(&mock_server);
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/analyze",
            &json!({"lang": "en", "coins": ["Bitcoin", "Ethereum"]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, gemini_success_body());
}

#[tokio::test]
async fn test_upstream_payload_shape() {
    let mock_server = MockServer::start().await;
    mount_success(&mock_server, 1).await;

    let app = create_test_app(&mock_server);
    let coins = ["Bitcoin", "Solana", "Bitcoin"];
    app.oneshot(json_request(
        "POST",
        "/api/analyze",
        &json!({"lang": "ko", "coins": coins}),
    ))
    .await
    .unwrap();

    let payload = sent_payload(&mock_server).await;
    let expected = serde_json::to_value(build_analysis_request(Language::Korean, &coins)).unwrap();
    assert_eq!(payload, expected);

    let prompt = payload["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Bitcoin, Solana, Bitcoin"));
    assert!(prompt.contains(Language::Korean.disclaimer()));
    assert_eq!(payload["tools"], json!([{"google_search": {}}]));
    assert_eq!(
        payload["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(
        payload["generationConfig"]["responseSchema"],
        coin_analysis_schema()
    );
}

#[tokio::test]
async fn test_unknown_lang_falls_back_to_english() {
    let mock_server = MockServer::start().await;
    mount_success(&mock_server, 1).await;

    let app = create_test_app(&mock_server);
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/analyze",
            &json!({"lang": "de", "coins": ["Cardano"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload = sent_payload(&mock_server).await;
    let prompt = payload["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains(Language::English.disclaimer()));
    assert!(!prompt.contains(Language::Korean.disclaimer()));
}

#[tokio::test]
async fn test_upstream_error_detail_is_suppressed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server);
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/analyze",
            &json!({"lang": "en", "coins": ["BTC"]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await, json!({"error": UPSTREAM_FAILURE}));
}

#[tokio::test]
async fn test_malformed_upstream_body_returns_generic_500() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server);
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/analyze",
            &json!({"coins": ["BTC"]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Internal server error."})
    );
}

#[tokio::test]
async fn test_repeated_requests_are_not_deduplicated() {
    let mock_server = MockServer::start().await;
    mount_success(&mock_server, 4).await;

    let body = json!({"lang": "en", "coins": ["BTC", "ETH"]});
    for _ in 0..4 {
        let app = create_test_app(&mock_server);
        let response = app
            .oneshot(json_request("POST", "/api/analyze", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(mock_server.received_requests().await.unwrap().len(), 4);
}
