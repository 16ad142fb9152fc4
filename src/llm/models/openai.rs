//! OpenAI-compatible chat-completions adapter. One wire client backs every
//! vendor speaking this protocol; `create_groq`, `create_deepseek` and
//! `create_ollama` reparameterize it with their own endpoint, credential and
//! catalog behavior.

use log::debug;
use serde_json::{json, Value};

use crate::config;
use crate::error::{Error, Result};
use crate::llm::model_spec::ModelSpec;
use crate::llm::models::provider_base::{PromptResponse, ProviderClient};
use crate::llm::retry::{run_with_retries, RetryPolicy, VendorFailure, VendorSignals};
use crate::llm::utils::network;

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
        VendorFailure::Api { status: 401, .. } => true,
        VendorFailure::Api { body, .. } => {
            let body = body.to_lowercase();
            body.contains("authentication") || body.contains("api key")
        }
        _ => false,
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    pub api_base: String,
    api_key: Option<String>,
    vendor: &'static str,
    catalog_filter: fn(&str) -> bool,
    sorted_catalog: bool,
    retry_policy: RetryPolicy,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    fn new(
        vendor: &'static str,
        api_base: String,
        api_key: Option<String>,
        catalog_filter: fn(&str) -> bool,
        sorted_catalog: bool,
    ) -> Self {
        Self {
            api_base,
            api_key,
            vendor,
            catalog_filter,
            sorted_catalog,
            retry_policy: RetryPolicy::default(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    fn bearer(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

/// Credential is read once here; a missing variable fails this adapter's
/// construction and nothing else.
pub fn create_openai() -> Result<OpenAiClient> {
    let key = config::require_env(config::OPENAI_API_KEY_VAR)?;
    Ok(OpenAiClient::new(
        "OpenAI",
        config::OPENAI_API_BASE.to_string(),
        Some(key),
        openai_catalog_filter,
        true,
    ))
}

pub fn create_groq() -> Result<OpenAiClient> {
    let key = config::require_env(config::GROQ_API_KEY_VAR)?;
    Ok(OpenAiClient::new(
        "Groq",
        config::GROQ_API_BASE.to_string(),
        Some(key),
        keep_all,
        false,
    ))
}

pub fn create_deepseek() -> Result<OpenAiClient> {
    let key = config::require_env(config::DEEPSEEK_API_KEY_VAR)?;
    Ok(OpenAiClient::new(
        "DeepSeek",
        config::DEEPSEEK_API_BASE.to_string(),
        Some(key),
        keep_all,
        false,
    ))
}

/// Ollama is keyless local inference; no Authorization header is sent.
pub fn create_ollama() -> Result<OpenAiClient> {
    let base = format!("{}/v1", config::ollama_host().trim_end_matches('/'));
    Ok(OpenAiClient::new("Ollama", base, None, keep_all, false))
}

fn openai_catalog_filter(id: &str) -> bool {
    id.starts_with("gpt-") || id.starts_with("text-")
}

fn keep_all(_id: &str) -> bool {
    true
}

impl ProviderClient for OpenAiClient {
    async fn list_models(&self) -> Result<Vec<String>> {
        debug!("{}: listing models", self.vendor);
        let url = format!("{}/models", self.api_base.trim_end_matches('/'));

        // No prompt/model context to retry with, so retryable causes
        // re-raise immediately.
        let catalog = run_with_retries(self.vendor, &SIGNALS, &RetryPolicy::no_retries(), || {
            network::get_json(&self.http_client, &url, self.bearer())
        })
        .await?;

        let data = catalog
            .get("data")
            .and_then(|v| v.as_array())
            .ok_or_else(|| Error::provider(self.vendor, "model catalog missing data array"))?;

        let mut models: Vec<String> = data
            .iter()
            .filter_map(|m| m.get("id").and_then(|v| v.as_str()))
            .filter(|id| (self.catalog_filter)(id))
            .map(str::to_string)
            .collect();

        if self.sorted_catalog {
            models.sort();
        }
        Ok(models)
    }

    async fn generate(&self, prompt: &str, model: &str) -> Result<PromptResponse> {
        let spec = ModelSpec::parse(model);
        if spec.option_tokens.is_some() {
            // Chat completions has no reasoning-budget field; the suffix is
            // still stripped so the vendor sees a clean model name.
            debug!(
                "{}: dropping thinking budget for {}",
                self.vendor, spec.base_model
            );
        }

        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let body = build_generate_body(&spec.base_model, prompt);
        debug!("{}: generate with model {}", self.vendor, spec.base_model);

        let response = run_with_retries(self.vendor, &SIGNALS, &self.retry_policy, || {
            network::post_json(&self.http_client, &url, self.bearer(), &body)
        })
        .await?;

        let content = extract_content(&response).ok_or_else(|| {
            Error::provider(
                self.vendor,
                format!("no generated text in response: {}", response),
            )
        })?;

        Ok(PromptResponse {
            model: model.to_string(),
            content,
            tokens: extract_tokens(&response),
        })
    }
}

fn build_generate_body(base_model: &str, prompt: &str) -> Value {
    json!({
        "model": base_model,
        "messages": [{ "role": "user", "content": prompt }],
        "temperature": 0.7,
        "max_tokens": 1024,
    })
}

/// Chat shape first, then the legacy completions shape.
fn extract_content(response: &Value) -> Option<String> {
    ["/choices/0/message/content", "/choices/0/text"]
        .into_iter()
        .find_map(|path| response.pointer(path).and_then(|v| v.as_str()))
        .map(str::to_string)
}

fn extract_tokens(response: &Value) -> Option<u64> {
    response.pointer("/usage/total_tokens").and_then(|v| v.as_u64())
}
