//! Gemini generateContent adapter. Authentication rides in the query string;
//! responses use the nested candidate/content/parts shape.

use log::debug;
use serde_json::{json, Value};

use crate::config;
use crate::error::Result;
use crate::llm::model_spec::ModelSpec;
use crate::llm::models::provider_base::{PromptResponse, ProviderClient};
use crate::llm::retry::{run_with_retries, RetryPolicy, VendorFailure, VendorSignals};
use crate::llm::utils::network;

const VENDOR: &str = "Gemini";

const SIGNALS: VendorSignals = VendorSignals {
    is_rate_limited,
    is_auth_failure,
};

fn is_rate_limited(failure: &VendorFailure) -> bool {
    match failure {
        VendorFailure::Api { status: 429, .. } => true,
        VendorFailure::Api { body, .. } => {
            let body = body.to_lowercase();
            body.contains("quota") || body.contains("rate limit")
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
            body.contains("authentication") || body.contains("api key")
        }
        _ => false,
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    pub api_base: String,
    api_key: String,
    retry_policy: RetryPolicy,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_base: String, api_key: String) -> Self {
        Self {
            api_base,
            api_key,
            retry_policy: RetryPolicy::default(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let key = config::require_env(config::GEMINI_API_KEY_VAR)?;
        Ok(Self::new(config::GEMINI_API_BASE.to_string(), key))
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }
}

impl ProviderClient for GeminiClient {
    async fn list_models(&self) -> Result<Vec<String>> {
        debug!("{}: listing models", VENDOR);
        let url = format!(
            "{}/models?key={}",
            self.api_base.trim_end_matches('/'),
            self.api_key
        );

        let catalog = run_with_retries(VENDOR, &SIGNALS, &RetryPolicy::no_retries(), || {
            network::get_json(&self.http_client, &url, None)
        })
        .await?;

        let models = catalog
            .get("models")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter(|m| supports_generate_content(m))
                    .filter_map(|m| m.get("name").and_then(|v| v.as_str()))
                    .map(|name| name.rsplit('/').next().unwrap_or(name).to_string())
                    .collect()
            })
            .unwrap_or_default();

        Ok(models)
    }

    async fn generate(&self, prompt: &str, model: &str) -> Result<PromptResponse> {
        let spec = ModelSpec::parse(model);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base.trim_end_matches('/'),
            spec.base_model,
            self.api_key
        );
        let body = build_generate_body(&spec, prompt);
        debug!(
            "{}: generate with model {} (thinking budget {:?})",
            VENDOR, spec.base_model, spec.option_tokens
        );

        let response = run_with_retries(VENDOR, &SIGNALS, &self.retry_policy, || {
            network::post_json(&self.http_client, &url, None, &body)
        })
        .await?;

        Ok(PromptResponse {
            model: model.to_string(),
            content: extract_content(&response),
            tokens: extract_tokens(&response),
        })
    }
}

fn supports_generate_content(model: &Value) -> bool {
    model
        .get("supportedGenerationMethods")
        .and_then(|v| v.as_array())
        .map(|methods| methods.iter().any(|m| m.as_str() == Some("generateContent")))
        .unwrap_or(false)
}

fn build_generate_body(spec: &ModelSpec, prompt: &str) -> Value {
    let mut body = json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "temperature": 0.7,
            "topP": 0.95,
            "topK": 40,
            "maxOutputTokens": 2048,
        },
    });
    if let Some(budget) = spec.option_tokens {
        body["generationConfig"]["thinkingConfig"] = json!({ "thinkingBudget": budget });
    }
    body
}

/// First part of the first candidate, then all parts joined, then the raw
/// payload as a diagnostic string.
fn extract_content(response: &Value) -> String {
    if let Some(text) = response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(|v| v.as_str())
    {
        return text.to_string();
    }

    if let Some(parts) = response
        .pointer("/candidates/0/content/parts")
        .and_then(|v| v.as_array())
    {
        let texts: Vec<&str> = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(|v| v.as_str()))
            .collect();
        if !texts.is_empty() {
            return texts.concat();
        }
    }

    response.to_string()
}

fn extract_tokens(response: &Value) -> Option<u64> {
    response
        .pointer("/usageMetadata/totalTokenCount")
        .and_then(|v| v.as_u64())
}
