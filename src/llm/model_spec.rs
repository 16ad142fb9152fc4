//! Parsing of model identifiers that carry an embedded option suffix.
//!
//! A model string may end in `:<digits>` plus an optional lowercase `k` or
//! `m` unit, encoding a reasoning/thinking token budget, e.g.
//! `claude-3-7-sonnet-20250219:4k` -> base model plus a budget of 4096.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref OPTION_SUFFIX: Regex = Regex::new(r"^(.*?):(\d+)([km])?$").unwrap();
}

/// A model identifier decomposed into the name handed to the vendor and the
/// optional token budget resolved from the unit suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub base_model: String,
    pub option_tokens: Option<u64>,
}

impl ModelSpec {
    /// Total parse: never fails. Input that does not match the suffix grammar
    /// (no colon, non-numeric tail, value too large) is returned whole as the
    /// base model with no option.
    pub fn parse(raw: &str) -> Self {
        let Some(caps) = OPTION_SUFFIX.captures(raw) else {
            return ModelSpec {
                base_model: raw.to_string(),
                option_tokens: None,
            };
        };

        let Ok(value) = caps[2].parse::<u64>() else {
            return ModelSpec {
                base_model: raw.to_string(),
                option_tokens: None,
            };
        };

        let multiplier: u64 = match caps.get(3).map(|m| m.as_str()) {
            Some("k") => 1024,
            Some("m") => 1024 * 1024,
            _ => 1,
        };

        ModelSpec {
            base_model: caps[1].to_string(),
            option_tokens: Some(value.saturating_mul(multiplier)),
        }
    }
}
