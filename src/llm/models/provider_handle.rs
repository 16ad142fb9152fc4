use crate::cons::provider_cons::Provider;
use crate::error::Result;
use crate::llm::models::anthropic::AnthropicClient;
use crate::llm::models::gemini::GeminiClient;
use crate::llm::models::openai::{
    create_deepseek, create_groq, create_ollama, create_openai, OpenAiClient,
};
use crate::llm::models::provider_base::{PromptResponse, ProviderClient};

#[derive(Debug)]
pub enum AnyProviderClient {
    OpenAi(OpenAiClient),
    Anthropic(AnthropicClient),
    Gemini(GeminiClient),
}

impl ProviderClient for AnyProviderClient {
    async fn list_models(&self) -> Result<Vec<String>> {
        match self {
            AnyProviderClient::OpenAi(c) => c.list_models().await,
            AnyProviderClient::Anthropic(c) => c.list_models().await,
            AnyProviderClient::Gemini(c) => c.list_models().await,
        }
    }

    async fn generate(&self, prompt: &str, model: &str) -> Result<PromptResponse> {
        match self {
            AnyProviderClient::OpenAi(c) => c.generate(prompt, model).await,
            AnyProviderClient::Anthropic(c) => c.generate(prompt, model).await,
            AnyProviderClient::Gemini(c) => c.generate(prompt, model).await,
        }
    }
}

/// Construct the adapter for a resolved provider, reading its credential from
/// the environment. A missing credential fails only this construction; other
/// providers are unaffected.
pub fn client_for(provider: Provider) -> Result<AnyProviderClient> {
    match provider {
        Provider::OpenAI => Ok(AnyProviderClient::OpenAi(create_openai()?)),
        Provider::Groq => Ok(AnyProviderClient::OpenAi(create_groq()?)),
        Provider::DeepSeek => Ok(AnyProviderClient::OpenAi(create_deepseek()?)),
        Provider::Ollama => Ok(AnyProviderClient::OpenAi(create_ollama()?)),
        Provider::Anthropic => Ok(AnyProviderClient::Anthropic(AnthropicClient::from_env()?)),
        Provider::Gemini => Ok(AnyProviderClient::Gemini(GeminiClient::from_env()?)),
    }
}
