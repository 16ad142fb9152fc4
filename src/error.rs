use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Uniform error taxonomy surfaced to callers of the provider layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Caller-supplied input (provider prefix, request shape) is invalid.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required credential environment variable is missing. Fatal for the
    /// adapter being constructed; other adapters are unaffected.
    #[error("{0} environment variable not set")]
    Credential(&'static str),

    /// The vendor rejected our credentials at call time. Never retried.
    #[error("{vendor} API key is invalid: {message}")]
    Auth {
        vendor: &'static str,
        message: String,
    },

    /// Any other vendor-side failure, including retry exhaustion. Carries the
    /// last underlying vendor message.
    #[error("{vendor} API error: {message}")]
    Provider {
        vendor: &'static str,
        message: String,
    },
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn auth(vendor: &'static str, message: impl Into<String>) -> Self {
        Error::Auth {
            vendor,
            message: message.into(),
        }
    }

    pub fn provider(vendor: &'static str, message: impl Into<String>) -> Self {
        Error::Provider {
            vendor,
            message: message.into(),
        }
    }
}
