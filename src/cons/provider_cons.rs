use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Anthropic,
    Gemini,
    Groq,
    DeepSeek,
    Ollama,
}

impl Provider {
    /// Returns the canonical lowercase name used in configuration and prefixes.
    pub fn provider_name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
            Provider::Groq => "groq",
            Provider::DeepSeek => "deepseek",
            Provider::Ollama => "ollama",
        }
    }

    /// Resolve a short prefix or full name, case-insensitively. The table is
    /// fixed; anything outside it is a validation error, never a default.
    pub fn from_prefix(prefix: &str) -> Result<Self> {
        match prefix.to_lowercase().as_str() {
            "o" | "openai" => Ok(Provider::OpenAI),
            "a" | "anthropic" => Ok(Provider::Anthropic),
            "g" | "gemini" => Ok(Provider::Gemini),
            "q" | "groq" => Ok(Provider::Groq),
            "d" | "deepseek" => Ok(Provider::DeepSeek),
            "l" | "ollama" => Ok(Provider::Ollama),
            _ => Err(Error::validation(format!(
                "unknown provider prefix: {}",
                prefix
            ))),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.provider_name())
    }
}
