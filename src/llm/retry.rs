//! Error classification and retry/backoff shared by every provider adapter.
//!
//! Each adapter contributes only a [`VendorSignals`] predicate pair; the
//! control flow lives here once, as a bounded loop with an explicit attempt
//! counter.

use std::future::Future;
use std::time::Duration;

use log::{error, warn};
use thiserror::Error;

use crate::error::{Error, Result};

/// A raw failure from one vendor call, before classification.
#[derive(Debug, Clone, Error)]
pub enum VendorFailure {
    /// The vendor answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The request never produced a vendor answer (DNS, connect, timeout).
    #[error("{0}")]
    Transport(String),

    /// The vendor answered but the payload could not be decoded.
    #[error("{0}")]
    Malformed(String),
}

/// Per-vendor classification predicates consumed by [`run_with_retries`].
pub struct VendorSignals {
    pub is_rate_limited: fn(&VendorFailure) -> bool,
    pub is_auth_failure: fn(&VendorFailure) -> bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    /// Base wait; backoff durations are multiples of this unit.
    pub unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 3,
            unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Policy for calls with no retry context (catalog listing): a retryable
    /// classification re-raises immediately instead of retrying blindly.
    pub fn no_retries() -> Self {
        RetryPolicy {
            max_retries: 0,
            ..RetryPolicy::default()
        }
    }

    /// Exponential backoff for rate-limit causes: `unit * 2^attempt`,
    /// 0-indexed.
    pub fn rate_limit_backoff(&self, attempt: usize) -> Duration {
        self.unit * 2u32.saturating_pow(attempt as u32)
    }

    /// Flat wait for generic vendor API errors.
    pub fn api_error_backoff(&self) -> Duration {
        self.unit
    }
}

/// Invoke `call` until it succeeds, the failure is terminal, or the retry
/// budget is exhausted. Classification priority: rate-limit signals retry
/// with exponential backoff; auth signals fail immediately as [`Error::Auth`]
/// regardless of remaining budget; any other vendor-reported API error
/// retries with a flat wait; transport and decode failures are terminal.
/// Exhaustion converts the last failure into [`Error::Provider`].
///
/// Each retry re-issues the whole vendor call with the same payload and no
/// idempotency key; a call that was billed but not returned may be charged
/// again. The sleep suspends only the calling task.
pub async fn run_with_retries<T, F, Fut>(
    vendor: &'static str,
    signals: &VendorSignals,
    policy: &RetryPolicy,
    mut call: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, VendorFailure>>,
{
    let mut attempt: usize = 0;
    loop {
        let failure = match call().await {
            Ok(value) => return Ok(value),
            Err(failure) => failure,
        };

        let wait = if (signals.is_rate_limited)(&failure) {
            Some(policy.rate_limit_backoff(attempt))
        } else if (signals.is_auth_failure)(&failure) {
            error!("{} rejected credentials: {}", vendor, failure);
            return Err(Error::auth(vendor, failure.to_string()));
        } else if matches!(failure, VendorFailure::Api { .. }) {
            Some(policy.api_error_backoff())
        } else {
            None
        };

        match wait {
            Some(wait) if attempt < policy.max_retries => {
                warn!(
                    "{} call failed on attempt {}, retrying in {:?}: {}",
                    vendor, attempt, wait, failure
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
            _ => {
                error!("{} call failed terminally: {}", vendor, failure);
                return Err(Error::provider(vendor, failure.to_string()));
            }
        }
    }
}
