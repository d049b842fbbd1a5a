//! Synthesis result value objects.
//!
//! - [`ProviderView`] - one provider's contribution as seen by the caller
//! - [`SynthesisResult`] - the final, immutable artifact of a council query

use super::level::ConsensusLevel;
use crate::provider::QueryOutcome;
use serde::{Deserialize, Serialize};

/// One provider's outcome together with the weight it carried
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderView {
    pub name: String,
    pub content: String,
    pub confidence: f64,
    pub weight: f64,
    /// Whether this outcome took part in synthesis
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProviderView {
    pub fn from_outcome(outcome: &QueryOutcome, weight: f64) -> Self {
        Self {
            name: outcome.provider_name.clone(),
            content: outcome.content.clone(),
            confidence: outcome.confidence_hint,
            weight,
            success: outcome.is_success(),
            latency_ms: outcome.latency_ms,
            token_count: outcome.token_count,
            error: outcome.error_message.clone(),
        }
    }
}

/// Final consensus judgment for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResult {
    pub consensus_level: ConsensusLevel,
    /// Weighted confidence in [0, 1]
    pub confidence_score: f64,
    pub synthesized_answer: String,
    /// Every outcome handed to the synthesizer, in input order
    pub per_provider_view: Vec<ProviderView>,
    /// Agreement statements in discovery order
    pub agreements: Vec<String>,
    pub disagreements: Vec<String>,
    /// Explanation of why providers disagree, when computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_analysis: Option<String>,
}

impl SynthesisResult {
    /// The single "no answer" result: conflicted, zero confidence.
    pub fn no_answer(message: impl AsRef<str>) -> Self {
        Self {
            consensus_level: ConsensusLevel::Conflicted,
            confidence_score: 0.0,
            synthesized_answer: format!("Error: {}", message.as_ref()),
            per_provider_view: Vec::new(),
            agreements: Vec::new(),
            disagreements: Vec::new(),
            meta_analysis: None,
        }
    }

    /// Attach the provider views the answer was built from.
    pub fn with_views(mut self, views: Vec<ProviderView>) -> Self {
        self.per_provider_view = views;
        self
    }

    /// Returns `true` if no provider produced a usable answer.
    pub fn is_no_answer(&self) -> bool {
        self.confidence_score == 0.0 && self.successful_views().next().is_none()
    }

    /// Views of providers that contributed to the answer.
    pub fn successful_views(&self) -> impl Iterator<Item = &ProviderView> {
        self.per_provider_view.iter().filter(|v| v.success)
    }

    /// Views of providers whose call failed.
    pub fn failed_views(&self) -> impl Iterator<Item = &ProviderView> {
        self.per_provider_view.iter().filter(|v| !v.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_answer() {
        let result = SynthesisResult::no_answer("No providers available");
        assert_eq!(result.consensus_level, ConsensusLevel::Conflicted);
        assert_eq!(result.confidence_score, 0.0);
        assert_eq!(result.synthesized_answer, "Error: No providers available");
        assert!(result.is_no_answer());
    }

    #[test]
    fn test_view_from_outcome() {
        let ok = QueryOutcome::success("Claude", "Answer").with_latency_ms(120.0);
        let failed = QueryOutcome::failure("Gemini", "Rate limited");

        let ok_view = ProviderView::from_outcome(&ok, 1.2);
        assert!(ok_view.success);
        assert_eq!(ok_view.weight, 1.2);
        assert_eq!(ok_view.latency_ms, Some(120.0));

        let failed_view = ProviderView::from_outcome(&failed, 1.0);
        assert!(!failed_view.success);
        assert_eq!(failed_view.error.as_deref(), Some("Rate limited"));
    }

    #[test]
    fn test_successful_and_failed_views() {
        let result = SynthesisResult::no_answer("All failed").with_views(vec![
            ProviderView::from_outcome(&QueryOutcome::failure("a", "x"), 1.0),
            ProviderView::from_outcome(&QueryOutcome::failure("b", "y"), 1.0),
        ]);
        assert_eq!(result.failed_views().count(), 2);
        assert_eq!(result.successful_views().count(), 0);
        assert!(result.is_no_answer());
    }
}
