//! Query outcome value object - the standardized record of one provider call.

use serde::{Deserialize, Serialize};

/// Confidence assumed when a provider does not report one
pub const DEFAULT_CONFIDENCE: f64 = 0.85;

/// Error message recorded for a call that hit its time limit
pub const TIMEOUT_MESSAGE: &str = "timeout";

/// Result of one provider call
///
/// Either carries non-empty content with no error, or an error message.
/// Only [`QueryOutcome::is_success`] outcomes take part in synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// Display name of the provider that produced this outcome
    pub provider_name: String,
    /// The response text (empty on failure)
    pub content: String,
    /// Provider-supplied confidence in [0, 1]
    pub confidence_hint: f64,
    /// Round-trip latency; absent if the call never returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
    /// Tokens consumed, if the provider reports usage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
    /// Error message if the call failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl QueryOutcome {
    /// Creates a successful outcome with the default confidence.
    pub fn success(provider_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            content: content.into(),
            confidence_hint: DEFAULT_CONFIDENCE,
            latency_ms: None,
            token_count: None,
            error_message: None,
        }
    }

    /// Creates a failed outcome carrying the error text.
    pub fn failure(provider_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            content: String::new(),
            confidence_hint: DEFAULT_CONFIDENCE,
            latency_ms: None,
            token_count: None,
            error_message: Some(error.into()),
        }
    }

    /// Creates the failed outcome for a call that exceeded its time limit.
    pub fn timeout(provider_name: impl Into<String>) -> Self {
        Self::failure(provider_name, TIMEOUT_MESSAGE)
    }

    /// Sets the confidence hint, clamped to [0, 1].
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence_hint = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            DEFAULT_CONFIDENCE
        };
        self
    }

    pub fn with_latency_ms(mut self, latency_ms: f64) -> Self {
        self.latency_ms = Some(latency_ms.max(0.0));
        self
    }

    pub fn with_token_count(mut self, tokens: u64) -> Self {
        self.token_count = Some(tokens);
        self
    }

    /// Returns `true` when there is no error and the content is non-empty.
    pub fn is_success(&self) -> bool {
        self.error_message.is_none() && !self.content.is_empty()
    }

    /// Returns `true` if this outcome records a timeout.
    pub fn is_timeout(&self) -> bool {
        self.error_message.as_deref() == Some(TIMEOUT_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_outcome() {
        let outcome = QueryOutcome::success("Claude", "Rust is a systems language.");
        assert!(outcome.is_success());
        assert_eq!(outcome.confidence_hint, DEFAULT_CONFIDENCE);
        assert!(outcome.latency_ms.is_none());
    }

    #[test]
    fn test_empty_content_is_not_success() {
        let outcome = QueryOutcome::success("Claude", "");
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_failure_outcome() {
        let outcome = QueryOutcome::failure("Gemini", "Authentication failed");
        assert!(!outcome.is_success());
        assert_eq!(outcome.error_message.as_deref(), Some("Authentication failed"));
        assert!(!outcome.is_timeout());
    }

    #[test]
    fn test_timeout_outcome() {
        let outcome = QueryOutcome::timeout("GPT");
        assert!(outcome.is_timeout());
        assert!(outcome.latency_ms.is_none());
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(QueryOutcome::success("a", "b").with_confidence(1.7).confidence_hint, 1.0);
        assert_eq!(QueryOutcome::success("a", "b").with_confidence(-0.2).confidence_hint, 0.0);
        assert_eq!(
            QueryOutcome::success("a", "b").with_confidence(f64::NAN).confidence_hint,
            DEFAULT_CONFIDENCE
        );
    }

    #[test]
    fn test_failure_skips_empty_fields_in_json() {
        let json = serde_json::to_value(QueryOutcome::failure("a", "boom")).unwrap();
        assert_eq!(json["error_message"], "boom");
        assert!(json.get("latency_ms").is_none());
        assert!(json.get("token_count").is_none());
    }
}
