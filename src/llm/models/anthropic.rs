//! Anthropic messages-API adapter. The model identifier may carry a thinking
//! budget suffix (`claude-3-7-sonnet-20250219:4k`), which is stripped from
//! the model name and forwarded as a request parameter.

use log::debug;
use serde_json::{json, Value};

use crate::config;
use crate::error::{Error, Result};
use crate::llm::model_spec::ModelSpec;
use crate::llm::models::provider_base::{PromptResponse, ProviderClient};
use crate::llm::retry::{run_with_retries, RetryPolicy, VendorFailure, VendorSignals};
use crate::llm::utils::network;

const VENDOR: &str = "Anthropic";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic exposes no catalog endpoint; the usable models are a fixed,
/// adapter-local table.
const MODEL_CATALOG: [&str; 7] = [
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-3-haiku-20240307",
    "claude-3-7-sonnet-20250219",
    "claude-2.1",
    "claude-2.0",
    "claude-instant-1.2",
];

const SIGNALS: VendorSignals = VendorSignals {
    is_rate_limited,
    is_auth_failure,
};

fn is_rate_limited(failure: &VendorFailure) -> bool {
    match failure {
        VendorFailure::Api { status: 429, .. } => true,
        VendorFailure::Api { body, .. } => {
            let body = body.to_lowercase();
            body.contains("rate limit") || body.contains("quota")
        }
        _ => false,
    }
}

fn is_auth_failure(failure: &VendorFailure) -> bool {
    match failure {
        VendorFailure::Api {
            status: 401 | 403, ..
        } => true,
        VendorFailure::Api { body, .. } => {
            let body = body.to_lowercase();
            body.contains("authentication") || body.contains("api key") || body.contains("x-api-key")
        }
        _ => false,
    }
}

#[derive(Debug, Clone)]
pub struct AnthropicClient {
    pub api_base: String,
    api_key: String,
    retry_policy: RetryPolicy,
    http_client: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(api_base: String, api_key: String) -> Self {
        Self {
            api_base,
            api_key,
            retry_policy: RetryPolicy::default(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let key = config::require_env(config::ANTHROPIC_API_KEY_VAR)?;
        Ok(Self::new(config::ANTHROPIC_API_BASE.to_string(), key))
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    async fn post_messages(&self, url: &str, body: &Value) -> std::result::Result<Value, VendorFailure> {
        let sent = self
            .http_client
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await;
        network::into_json(sent).await
    }
}

impl ProviderClient for AnthropicClient {
    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(MODEL_CATALOG.iter().map(|m| m.to_string()).collect())
    }

    async fn generate(&self, prompt: &str, model: &str) -> Result<PromptResponse> {
        let spec = ModelSpec::parse(model);
        let url = format!("{}/v1/messages", self.api_base.trim_end_matches('/'));
        let body = build_generate_body(&spec, prompt);
        debug!(
            "{}: generate with model {} (thinking budget {:?})",
            VENDOR, spec.base_model, spec.option_tokens
        );

        let response = run_with_retries(VENDOR, &SIGNALS, &self.retry_policy, || {
            self.post_messages(&url, &body)
        })
        .await?;

        let content = extract_content(&response).ok_or_else(|| {
            Error::provider(VENDOR, format!("no generated text in response: {}", response))
        })?;

        Ok(PromptResponse {
            model: model.to_string(),
            content,
            tokens: extract_tokens(&response),
        })
    }
}

fn build_generate_body(spec: &ModelSpec, prompt: &str) -> Value {
    let mut body = json!({
        "model": spec.base_model,
        "max_tokens": 1024,
        "messages": [{ "role": "user", "content": prompt }],
    });
    if let Some(budget) = spec.option_tokens {
        body["thinking_tokens"] = json!(budget);
    }
    body
}

/// First text content block, then all text blocks joined.
fn extract_content(response: &Value) -> Option<String> {
    if let Some(text) = response.pointer("/content/0/text").and_then(|v| v.as_str()) {
        return Some(text.to_string());
    }

    let blocks = response.get("content")?.as_array()?;
    let texts: Vec<&str> = blocks
        .iter()
        .filter_map(|b| b.get("text").and_then(|v| v.as_str()))
        .collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

/// Anthropic reports usage split by direction; the uniform response carries
/// the sum.
fn extract_tokens(response: &Value) -> Option<u64> {
    let input = response.pointer("/usage/input_tokens").and_then(|v| v.as_u64())?;
    let output = response.pointer("/usage/output_tokens").and_then(|v| v.as_u64())?;
    Some(input + output)
}
