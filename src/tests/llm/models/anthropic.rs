use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::Error;
use crate::llm::models::anthropic::AnthropicClient;
use crate::llm::models::provider_base::ProviderClient;
use crate::llm::retry::RetryPolicy;

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        unit: Duration::from_millis(0),
    }
}

#[tokio::test]
async fn generate_forwards_thinking_budget_and_echoes_suffixed_model() {
    let server = MockServer::start().await;
    // "base-model:4k" must reach the vendor as base-model with a 4096 budget.
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "base-model",
            "thinking_tokens": 4096
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "text", "text": "Recursion is a function calling itself." }],
            "usage": { "input_tokens": 5, "output_tokens": 7 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        AnthropicClient::new(server.uri(), "test-key".to_string()).with_retry_policy(fast_policy());
    let response = client
        .generate("Explain recursion", "base-model:4k")
        .await
        .unwrap();

    assert_eq!(response.model, "base-model:4k");
    assert_eq!(response.content, "Recursion is a function calling itself.");
    assert_eq!(response.tokens, Some(12));
}

#[tokio::test]
async fn generate_without_suffix_sends_no_budget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_partial_json(json!({ "model": "claude-3-haiku-20240307" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "text", "text": "hello" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        AnthropicClient::new(server.uri(), "test-key".to_string()).with_retry_policy(fast_policy());
    let response = client.generate("hi", "claude-3-haiku-20240307").await.unwrap();

    assert_eq!(response.content, "hello");
    // Vendor reported no usage for this call.
    assert_eq!(response.tokens, None);
}

#[tokio::test]
async fn generate_maps_credential_rejection_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "error",
            "error": { "type": "authentication_error", "message": "invalid x-api-key" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        AnthropicClient::new(server.uri(), "bad-key".to_string()).with_retry_policy(fast_policy());
    let err = client.generate("hi", "claude-3-haiku-20240307").await.unwrap_err();

    assert!(matches!(err, Error::Auth { vendor: "Anthropic", .. }));
}

#[tokio::test]
async fn list_models_returns_the_static_catalog() {
    // No catalog endpoint exists; nothing must hit the network.
    let client = AnthropicClient::new(
        "http://127.0.0.1:1".to_string(),
        "test-key".to_string(),
    );
    let models = client.list_models().await.unwrap();

    assert!(models.contains(&"claude-3-opus-20240229".to_string()));
    assert!(models.contains(&"claude-3-7-sonnet-20250219".to_string()));
    assert_eq!(models.len(), 7);
}
