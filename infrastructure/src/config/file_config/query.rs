//! Query configuration from TOML (`[query]` section)

use council_application::config::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT};
use council_domain::QueryParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw query configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQueryConfig {
    /// Maximum output tokens per provider
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Time limit for a provider without its own `timeout_seconds`
    pub timeout_seconds: u64,
}

impl Default for FileQueryConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl FileQueryConfig {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
