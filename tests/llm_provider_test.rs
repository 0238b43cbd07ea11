// ABOUTME: Integration tests for the OpenAI-compatible text producer against a mock HTTP server
// ABOUTME: Validates request shape, auth header, response mapping and error-status translation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use mealplan_engine::config::LlmConfig;
use mealplan_engine::errors::ErrorCode;
use mealplan_engine::llm::{ChatMessage, ChatRequest, LlmProvider, OpenAiCompatibleProvider};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer, api_key: Option<&str>) -> OpenAiCompatibleProvider {
    let config = LlmConfig {
        base_url: format!("{}/v1", server.uri()),
        model: "test-model".to_owned(),
        api_key: api_key.map(str::to_owned),
        timeout_secs: 5,
        ..LlmConfig::default()
    };
    OpenAiCompatibleProvider::from_llm_config(&config).unwrap()
}

fn plan_request() -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system("You plan meals."),
        ChatMessage::user("1800 kcal, 3 meals"),
    ])
    .with_temperature(0.3)
    .with_max_tokens(512)
}

// ============================================================================
// Successful completions
// ============================================================================

#[tokio::test]
async fn test_complete_returns_content_and_usage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer secret"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "max_tokens": 512,
            "stream": false,
            "messages": [
                { "role": "system", "content": "You plan meals." },
                { "role": "user", "content": "1800 kcal, 3 meals" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "test-model-0613",
            "choices": [{
                "message": { "role": "assistant", "content": "{\"meals\": []}" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 40, "completion_tokens": 12, "total_tokens": 52 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, Some("secret"));
    let response = provider.complete(&plan_request()).await.unwrap();

    assert_eq!(response.content, "{\"meals\": []}");
    assert_eq!(response.model, "test-model-0613");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    let usage = response.usage.unwrap();
    assert_eq!(usage.total_tokens, 52);
}

#[tokio::test]
async fn test_request_model_overrides_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "model": "other-model" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, None);
    let response = provider
        .complete(&plan_request().with_model("other-model"))
        .await
        .unwrap();

    assert_eq!(response.content, "ok");
    assert_eq!(response.model, "other-model");
}

#[tokio::test]
async fn test_empty_choices_is_external_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = provider_for(&server, None)
        .complete(&plan_request())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

// ============================================================================
// Error statuses
// ============================================================================

async fn error_for(status: u16, body: serde_json::Value) -> mealplan_engine::errors::AppError {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;

    provider_for(&server, None)
        .complete(&plan_request())
        .await
        .unwrap_err()
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_failure() {
    let err = error_for(401, json!({ "error": { "message": "bad key" } })).await;
    assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_rate_limit_is_retryable() {
    let err = error_for(
        429,
        json!({ "error": { "message": "Rate limit reached. Please try again in 7.2s." } }),
    )
    .await;

    assert_eq!(err.code, ErrorCode::ExternalRateLimited);
    assert!(err.message.contains("try again in 8 seconds"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unknown_model_maps_to_not_found() {
    let err = error_for(404, json!({ "error": { "message": "model not found" } })).await;
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(err.message, "Model or endpoint (model not found) not found");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_plain_text_gateway_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server, None)
        .complete(&plan_request())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(err.is_retryable());
}

// ============================================================================
// Health check
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    assert!(provider_for(&server, None).health_check().await.unwrap());
}

#[tokio::test]
async fn test_health_check_unhealthy_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(!provider_for(&server, None).health_check().await.unwrap());
}
