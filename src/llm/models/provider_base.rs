use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A prompt to run against one or more models. `models` absent means "use
/// configured defaults", which is the calling layer's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
}

impl PromptRequest {
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(Error::validation("prompt must not be empty"));
        }
        if let Some(models) = &self.models {
            if models.is_empty() {
                return Err(Error::validation("models, when present, must not be empty"));
            }
        }
        Ok(())
    }
}

/// One generation result. `model` echoes the exact identifier the caller
/// passed in, option suffix included, not the base name sent to the vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResponse {
    pub model: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u64>,
}

/// The uniform contract every vendor adapter implements.
#[allow(async_fn_in_trait)]
pub trait ProviderClient: Send + Sync {
    /// Vendor catalog filtered to models usable for text generation.
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Run one prompt against one model identifier (which may carry an
    /// option suffix).
    async fn generate(&self, prompt: &str, model: &str) -> Result<PromptResponse>;
}
