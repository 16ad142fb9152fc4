// Shared data model and per-vendor client implementations

pub mod provider_base;
pub mod provider_handle;

pub mod anthropic;
pub mod gemini;
pub mod openai;
