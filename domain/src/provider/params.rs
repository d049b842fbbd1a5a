//! Per-call query parameters passed through to every provider.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Optional sampling/length parameters for a single council query.
///
/// The orchestrator never inspects these; each provider maps the fields it
/// understands onto its own request format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Maximum output length in tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Provider-specific extras, forwarded untouched
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Fill unset fields from `defaults`, keeping values already present.
    pub fn or(mut self, defaults: &QueryParams) -> Self {
        self.max_tokens = self.max_tokens.or(defaults.max_tokens);
        self.temperature = self.temperature.or(defaults.temperature);
        for (key, value) in &defaults.extra {
            self.extra.entry(key.clone()).or_insert_with(|| value.clone());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let params = QueryParams::new()
            .with_max_tokens(1024)
            .with_temperature(0.2)
            .with_extra("top_p", serde_json::json!(0.9));

        assert_eq!(params.max_tokens, Some(1024));
        assert_eq!(params.temperature, Some(0.2));
        assert_eq!(params.extra["top_p"], serde_json::json!(0.9));
    }

    #[test]
    fn test_or_keeps_explicit_values() {
        let defaults = QueryParams::new().with_max_tokens(4096).with_temperature(0.7);
        let params = QueryParams::new().with_temperature(0.1).or(&defaults);

        assert_eq!(params.max_tokens, Some(4096));
        assert_eq!(params.temperature, Some(0.1));
    }
}
