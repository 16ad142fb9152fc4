use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::Error;
use crate::llm::models::openai::{create_openai, OpenAiClient};
use crate::llm::models::provider_base::ProviderClient;
use crate::llm::retry::RetryPolicy;

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_retries: 3,
        unit: Duration::from_millis(0),
    }
}

fn test_client(server: &MockServer) -> OpenAiClient {
    std::env::set_var("OPENAI_API_KEY", "test-key");
    create_openai()
        .unwrap()
        .with_api_base(server.uri())
        .with_retry_policy(fast_policy())
}

#[tokio::test]
async fn generate_sends_base_model_and_echoes_original_identifier() {
    let server = MockServer::start().await;
    // The vendor must see the clean base name, not the suffixed identifier.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({ "model": "gpt-4o" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "pong" } }],
            "usage": { "total_tokens": 10 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client.generate("ping", "gpt-4o:4k").await.unwrap();

    assert_eq!(response.model, "gpt-4o:4k");
    assert_eq!(response.content, "pong");
    assert_eq!(response.tokens, Some(10));
}

#[tokio::test]
async fn generate_retries_once_after_a_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "recovered" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client.generate("ping", "gpt-4o").await.unwrap();

    assert_eq!(response.content, "recovered");
    assert_eq!(response.tokens, None);
}

#[tokio::test]
async fn generate_surfaces_auth_failures_without_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string("Incorrect API key provided"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.generate("ping", "gpt-4o").await.unwrap_err();

    match err {
        Error::Auth { vendor, message } => {
            assert_eq!(vendor, "OpenAI");
            assert!(message.contains("Incorrect API key"));
        }
        other => panic!("expected auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn generate_exhausts_retries_into_a_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(4)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.generate("ping", "gpt-4o").await.unwrap_err();

    assert!(matches!(err, Error::Provider { vendor: "OpenAI", .. }));
}

#[tokio::test]
async fn list_models_filters_and_sorts_the_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": "whisper-1" },
                { "id": "text-davinci-003" },
                { "id": "gpt-4o" },
                { "id": "dall-e-3" },
                { "id": "gpt-3.5-turbo" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let models = client.list_models().await.unwrap();

    assert_eq!(models, vec!["gpt-3.5-turbo", "gpt-4o", "text-davinci-003"]);
}

#[tokio::test]
async fn list_models_does_not_retry_rate_limits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.list_models().await.unwrap_err();

    assert!(matches!(err, Error::Provider { vendor: "OpenAI", .. }));
}
