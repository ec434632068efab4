//! Endpoint configuration resolved once per test session from the environment.

use std::time::Duration;

pub const API_URL_VAR: &str = "FCONTRACT_API_URL";
pub const TIMEOUT_SECONDS_VAR: &str = "FCONTRACT_TIMEOUT_SECONDS";
pub const MODEL_VAR: &str = "FCONTRACT_MODEL";

pub const DEFAULT_API_URL: &str =
    "https://gigachat.devices.sberbank.ru/api/v1/chat/completions";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_MODEL: &str = "GigaChat";

/// Resolved chat-completion endpoint settings.
///
/// Immutable once resolved; callers build it at session start and pass it by
/// reference into every scenario. There is no error path: absent or
/// unparseable overrides fall back to the fixed defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub default_model: String,
}

impl EndpointConfig {
    /// Reads the endpoint URL, request timeout, and default model from the
    /// environment, with fixed fallbacks for anything unset.
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(API_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        // Timeout must stay positive; anything else keeps the default.
        let timeout_seconds = lookup(TIMEOUT_SECONDS_VAR)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|seconds| *seconds > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        let default_model = lookup(MODEL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            base_url,
            timeout: Duration::from_secs(timeout_seconds),
            default_model,
        }
    }
}
