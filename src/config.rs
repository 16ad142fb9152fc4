//! Fixed vendor endpoints and credential environment variable names.

use crate::error::{Error, Result};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEEPSEEK_API_BASE: &str = "https://api.deepseek.com/v1";
pub const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";
pub const DEEPSEEK_API_KEY_VAR: &str = "DEEPSEEK_API_KEY";
pub const ANTHROPIC_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

pub const OLLAMA_HOST_VAR: &str = "OLLAMA_HOST";
pub const OLLAMA_DEFAULT_HOST: &str = "http://localhost:11434";

/// Read a credential from the process environment. Read once, at adapter
/// construction; never refreshed afterwards.
pub fn require_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Credential(name)),
    }
}

/// Ollama serves keyless local inference, so its only knob is the host.
pub fn ollama_host() -> String {
    std::env::var(OLLAMA_HOST_VAR).unwrap_or_else(|_| OLLAMA_DEFAULT_HOST.to_string())
}
