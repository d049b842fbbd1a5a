//! Consensus synthesizer - turns a list of provider outcomes into one answer.
//!
//! The synthesizer is pure: no clock, no randomness, no I/O. Given the same
//! outcomes, weights and prompt it always produces the same result.

use super::agreement::find_agreements;
use super::config::SynthesisConfig;
use super::disagreement::find_disagreements;
use super::level::ConsensusLevel;
use super::meta::meta_analysis;
use super::result::{ProviderView, SynthesisResult};
use super::scoring::{WeightedConfidence, clamp_score, consensus_confidence};
use super::statements::ProviderStatements;
use crate::core::error::DomainError;
use crate::provider::{DEFAULT_WEIGHT, QueryOutcome};
use std::collections::HashMap;

/// Message used when no outcome in the input succeeded
pub const NO_VALID_RESPONSES: &str = "No valid responses received";

/// Disagreements listed under the synthesized answer
const MAX_LISTED_DISAGREEMENTS: usize = 3;

/// Combines provider outcomes into a [`SynthesisResult`].
#[derive(Debug, Clone)]
pub struct ConsensusSynthesizer {
    config: SynthesisConfig,
}

impl Default for ConsensusSynthesizer {
    fn default() -> Self {
        Self {
            config: SynthesisConfig::default(),
        }
    }
}

impl ConsensusSynthesizer {
    /// Create a synthesizer, rejecting invalid thresholds up front.
    pub fn new(config: SynthesisConfig) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Synthesize a consensus answer.
    ///
    /// `outcomes` may include failures; they are kept in the per-provider
    /// view but ignored for scoring. Providers missing from `weights` weigh
    /// [`DEFAULT_WEIGHT`].
    pub fn synthesize(
        &self,
        outcomes: &[QueryOutcome],
        weights: &HashMap<String, f64>,
        prompt: &str,
    ) -> SynthesisResult {
        let weight_of = |name: &str| weights.get(name).copied().unwrap_or(DEFAULT_WEIGHT);

        let views: Vec<ProviderView> = outcomes
            .iter()
            .map(|o| ProviderView::from_outcome(o, weight_of(&o.provider_name)))
            .collect();

        let valid: Vec<&QueryOutcome> = outcomes.iter().filter(|o| o.is_success()).collect();

        match valid.as_slice() {
            [] => SynthesisResult::no_answer(NO_VALID_RESPONSES).with_views(views),
            [only] => SynthesisResult {
                consensus_level: ConsensusLevel::Strong,
                confidence_score: clamp_score(only.confidence_hint),
                synthesized_answer: only.content.clone(),
                per_provider_view: views,
                agreements: Vec::new(),
                disagreements: Vec::new(),
                meta_analysis: None,
            },
            _ => self.synthesize_many(&valid, views, &weight_of, prompt),
        }
    }

    fn synthesize_many(
        &self,
        valid: &[&QueryOutcome],
        views: Vec<ProviderView>,
        weight_of: &dyn Fn(&str) -> f64,
        prompt: &str,
    ) -> SynthesisResult {
        let statements: Vec<ProviderStatements> = valid
            .iter()
            .map(|o| ProviderStatements::from_content(o.provider_name.as_str(), &o.content))
            .collect();

        let agreements = find_agreements(&statements);
        let disagreements = find_disagreements(&statements);

        let weighted: Vec<WeightedConfidence> = valid
            .iter()
            .map(|o| WeightedConfidence {
                confidence: o.confidence_hint,
                weight: weight_of(&o.provider_name),
            })
            .collect();

        let confidence_score =
            consensus_confidence(&weighted, agreements.len(), disagreements.len());
        let consensus_level = self.config.classify(confidence_score);

        let primary = primary_response(valid, &weighted);
        let synthesized_answer =
            compose_answer(consensus_level, &agreements, &disagreements, primary);

        let meta_analysis = (self.config.enable_meta_analysis && !disagreements.is_empty())
            .then(|| {
                let contents: Vec<&str> = valid.iter().map(|o| o.content.as_str()).collect();
                meta_analysis(prompt, &contents, disagreements.len())
            });

        SynthesisResult {
            consensus_level,
            confidence_score,
            synthesized_answer,
            per_provider_view: views,
            agreements,
            disagreements,
            meta_analysis,
        }
    }
}

/// The outcome with the highest `weight * confidence`; ties go to the earliest.
fn primary_response<'a>(
    valid: &[&'a QueryOutcome],
    weighted: &[WeightedConfidence],
) -> &'a QueryOutcome {
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (i, w) in weighted.iter().enumerate() {
        let score = w.weight * w.confidence;
        if score > best_score {
            best = i;
            best_score = score;
        }
    }
    valid[best]
}

fn compose_answer(
    level: ConsensusLevel,
    agreements: &[String],
    disagreements: &[String],
    primary: &QueryOutcome,
) -> String {
    let mut lines = vec![format!("{}\n", level.header())];

    if !agreements.is_empty() {
        lines.push("\n**Common Points:**".to_string());
        for (i, agreement) in agreements.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, agreement));
        }
    }

    lines.push(format!(
        "\n**Synthesized Answer (based on {}):**",
        primary.provider_name
    ));
    lines.push(primary.content.clone());

    if !disagreements.is_empty() {
        lines.push("\n**Note: Some Disagreements Found:**".to_string());
        for disagreement in disagreements.iter().take(MAX_LISTED_DISAGREEMENTS) {
            lines.push(format!("- {}", disagreement));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(n, w)| (n.to_string(), *w)).collect()
    }

    fn python_outcomes() -> Vec<QueryOutcome> {
        vec![
            QueryOutcome::success(
                "Claude",
                "Python is better for data science due to its rich libraries. \
                 Packages like pandas and numpy make analysis simple.",
            )
            .with_confidence(0.9),
            QueryOutcome::success(
                "Gemini",
                "Python is preferred for data science work because of its ecosystem. \
                 The libraries available for machine learning are excellent.",
            )
            .with_confidence(0.85),
            QueryOutcome::success(
                "GPT-4",
                "Python is the leading language for data science today. \
                 Its libraries and community support are extensive.",
            )
            .with_confidence(0.88),
        ]
    }

    fn default_weights() -> HashMap<String, f64> {
        weights(&[("Claude", 1.2), ("Gemini", 1.0), ("GPT-4", 1.1)])
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SynthesisConfig {
            strong_threshold: 0.5,
            weak_threshold: 0.7,
            ..SynthesisConfig::default()
        };
        assert!(ConsensusSynthesizer::new(config).is_err());
    }

    #[test]
    fn test_shared_topic_is_strong_consensus() {
        let synthesizer = ConsensusSynthesizer::default();
        let result = synthesizer.synthesize(
            &python_outcomes(),
            &default_weights(),
            "What is the best language for data science?",
        );

        assert_eq!(result.consensus_level, ConsensusLevel::Strong);
        assert!(result.confidence_score >= 0.8);
        assert!(result.disagreements.is_empty());
        assert!(result.meta_analysis.is_none());
        assert!(
            result
                .agreements
                .iter()
                .any(|a| a.to_lowercase().contains("python"))
        );
        assert!(
            result
                .synthesized_answer
                .starts_with("**Strong Consensus** - All models largely agree:")
        );
        assert!(result.synthesized_answer.contains("**Common Points:**"));
        // Claude has the largest weight * confidence
        assert!(
            result
                .synthesized_answer
                .contains("**Synthesized Answer (based on Claude):**")
        );
    }

    #[test]
    fn test_yes_versus_no_is_low_consensus() {
        let outcomes = vec![
            QueryOutcome::success("Alpha", "Yes, upgrading is safe to do right now."),
            QueryOutcome::success("Beta", "No, waiting is the better option today."),
        ];
        let synthesizer = ConsensusSynthesizer::default();
        let result = synthesizer.synthesize(&outcomes, &HashMap::new(), "Upgrade now?");

        assert!(!result.disagreements.is_empty());
        assert!(matches!(
            result.consensus_level,
            ConsensusLevel::Weak | ConsensusLevel::Conflicted
        ));
        assert!(
            result
                .synthesized_answer
                .contains("**Note: Some Disagreements Found:**")
        );

        let meta = result.meta_analysis.expect("meta-analysis for disagreement");
        assert!(meta.contains("Original Question: Upgrade now?"));
        assert!(meta.contains("Number of Models: 2"));
        assert!(meta.contains("Disagreements Found: 1"));
    }

    #[test]
    fn test_meta_analysis_can_be_disabled() {
        let outcomes = vec![
            QueryOutcome::success("Alpha", "Yes, upgrading is safe to do right now."),
            QueryOutcome::success("Beta", "No, waiting is the better option today."),
        ];
        let config = SynthesisConfig::default().with_meta_analysis(false);
        let synthesizer = ConsensusSynthesizer::new(config).unwrap();
        let result = synthesizer.synthesize(&outcomes, &HashMap::new(), "Upgrade now?");

        assert!(!result.disagreements.is_empty());
        assert!(result.meta_analysis.is_none());
    }

    #[test]
    fn test_partial_failure_keeps_successful_views() {
        let mut outcomes = python_outcomes();
        outcomes[1] = QueryOutcome::failure("Gemini", "Rate limited");

        let synthesizer = ConsensusSynthesizer::default();
        let result = synthesizer.synthesize(&outcomes, &default_weights(), "q");

        assert!(!result.synthesized_answer.is_empty());
        assert_eq!(result.per_provider_view.len(), 3);
        assert_eq!(result.successful_views().count(), 2);
        let failed: Vec<_> = result.failed_views().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].name, "Gemini");
        assert_eq!(failed[0].error.as_deref(), Some("Rate limited"));
    }

    #[test]
    fn test_no_valid_responses() {
        let outcomes = vec![
            QueryOutcome::failure("Claude", "boom"),
            QueryOutcome::timeout("Gemini"),
        ];
        let result = ConsensusSynthesizer::default().synthesize(&outcomes, &HashMap::new(), "q");

        assert_eq!(result.consensus_level, ConsensusLevel::Conflicted);
        assert_eq!(result.confidence_score, 0.0);
        assert_eq!(result.synthesized_answer, "Error: No valid responses received");
        assert_eq!(result.per_provider_view.len(), 2);
        assert!(result.agreements.is_empty());
        assert!(result.disagreements.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let result = ConsensusSynthesizer::default().synthesize(&[], &HashMap::new(), "q");
        assert_eq!(result.confidence_score, 0.0);
        assert!(result.per_provider_view.is_empty());
    }

    #[test]
    fn test_single_valid_response_is_strong() {
        let outcomes = vec![
            QueryOutcome::success("Claude", "Use a B-tree index.").with_confidence(0.72),
            QueryOutcome::failure("Gemini", "Unauthorized"),
        ];
        let result = ConsensusSynthesizer::default().synthesize(&outcomes, &HashMap::new(), "q");

        assert_eq!(result.consensus_level, ConsensusLevel::Strong);
        assert_eq!(result.confidence_score, 0.72);
        assert_eq!(result.synthesized_answer, "Use a B-tree index.");
        assert!(result.agreements.is_empty());
        assert!(result.disagreements.is_empty());
        assert!(result.meta_analysis.is_none());
    }

    #[test]
    fn test_single_valid_out_of_range_hint_is_clamped() {
        let mut high = QueryOutcome::success("Claude", "Use a B-tree index.");
        high.confidence_hint = 1.7;
        let result = ConsensusSynthesizer::default().synthesize(&[high], &HashMap::new(), "q");
        assert_eq!(result.confidence_score, 1.0);

        let mut broken = QueryOutcome::success("Claude", "Use a B-tree index.");
        broken.confidence_hint = f64::NAN;
        let result = ConsensusSynthesizer::default().synthesize(&[broken], &HashMap::new(), "q");
        assert_eq!(result.confidence_score, 0.0);
    }

    #[test]
    fn test_three_way_yes_no_with_neutral_voice() {
        let outcomes = vec![
            QueryOutcome::success("Alpha", "Yes, rewriting it in Rust pays off quickly."),
            QueryOutcome::success("Beta", "No, that effort would waste months of work."),
            QueryOutcome::success("Gamma", "Benchmark both options before deciding."),
        ];
        let result = ConsensusSynthesizer::default().synthesize(
            &outcomes,
            &HashMap::new(),
            "Rewrite in Rust?",
        );

        assert!(result.agreements.is_empty());
        assert!(!result.disagreements.is_empty());
        assert!(result.disagreements[0].starts_with("Alpha says: Yes, rewriting"));
        assert!(matches!(
            result.consensus_level,
            ConsensusLevel::Weak | ConsensusLevel::Conflicted
        ));
        assert!(result.confidence_score < 0.6);
        assert!(
            result
                .meta_analysis
                .as_deref()
                .is_some_and(|m| m.contains("Number of Models: 3"))
        );
    }

    #[test]
    fn test_synthesize_is_idempotent() {
        let synthesizer = ConsensusSynthesizer::default();
        let outcomes = python_outcomes();
        let weights = default_weights();

        let first = synthesizer.synthesize(&outcomes, &weights, "q");
        let second = synthesizer.synthesize(&outcomes, &weights, "q");
        assert_eq!(first, second);
    }

    #[test]
    fn test_raising_majority_weight_never_lowers_confidence() {
        let synthesizer = ConsensusSynthesizer::default();
        let outcomes = vec![
            QueryOutcome::success("Alpha", "Yes, caching the results is worth it here.")
                .with_confidence(0.95),
            QueryOutcome::success("Beta", "Caching the results pays off for reads.")
                .with_confidence(0.8),
            QueryOutcome::success("Gamma", "No, recomputing is cheaper for this workload.")
                .with_confidence(0.6),
        ];

        let base = synthesizer.synthesize(
            &outcomes,
            &weights(&[("Alpha", 1.0), ("Beta", 1.0), ("Gamma", 1.0)]),
            "q",
        );
        let boosted = synthesizer.synthesize(
            &outcomes,
            &weights(&[("Alpha", 3.0), ("Beta", 1.0), ("Gamma", 1.0)]),
            "q",
        );

        assert!(boosted.confidence_score >= base.confidence_score);
        assert_eq!(base.agreements, boosted.agreements);
        assert_eq!(base.disagreements, boosted.disagreements);
    }

    #[test]
    fn test_missing_weight_defaults_to_one() {
        let synthesizer = ConsensusSynthesizer::default();
        let outcomes = python_outcomes();

        let implicit = synthesizer.synthesize(&outcomes, &HashMap::new(), "q");
        let explicit = synthesizer.synthesize(
            &outcomes,
            &weights(&[("Claude", 1.0), ("Gemini", 1.0), ("GPT-4", 1.0)]),
            "q",
        );
        assert_eq!(implicit, explicit);
        assert!(implicit.per_provider_view.iter().all(|v| v.weight == 1.0));
    }

    #[test]
    fn test_primary_tie_goes_to_first() {
        let outcomes = vec![
            QueryOutcome::success("First", "Sharding by tenant keeps hot data local."),
            QueryOutcome::success("Second", "Sharding by region lowers cross-zone traffic."),
        ];
        let result = ConsensusSynthesizer::default().synthesize(&outcomes, &HashMap::new(), "q");
        assert!(
            result
                .synthesized_answer
                .contains("**Synthesized Answer (based on First):**")
        );
    }

    #[test]
    fn test_lists_at_most_three_disagreements() {
        let positive = "Yes this works well in practice. Yes it scales to many users. \
                        Yes the docs are thorough enough";
        let negative = "No it breaks under real load. No it never scaled for us at all";
        let outcomes = vec![
            QueryOutcome::success("A", positive),
            QueryOutcome::success("B", negative),
        ];
        let result = ConsensusSynthesizer::default().synthesize(&outcomes, &HashMap::new(), "q");

        assert_eq!(result.disagreements.len(), 5);
        let listed = result
            .synthesized_answer
            .lines()
            .filter(|l| l.starts_with("- A says:"))
            .count();
        assert_eq!(listed, MAX_LISTED_DISAGREEMENTS);
    }
}
