//! Weighted confidence scoring.

/// Share of the final score taken by the agreement ratio
pub const AGREEMENT_SHARE: f64 = 0.6;

/// Share of the final score taken by the weighted provider confidence
pub const CONFIDENCE_SHARE: f64 = 0.4;

/// A provider's self-reported confidence and the weight it carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedConfidence {
    pub confidence: f64,
    pub weight: f64,
}

/// Weighted mean of provider confidences.
///
/// Falls back to the plain mean if the weights do not sum to a positive
/// number, and to `0.0` for an empty input.
pub fn weighted_average_confidence(entries: &[WeightedConfidence]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }

    let total_weight: f64 = entries.iter().map(|e| e.weight).sum();
    if total_weight > 0.0 && total_weight.is_finite() {
        entries.iter().map(|e| e.confidence * e.weight).sum::<f64>() / total_weight
    } else {
        entries.iter().map(|e| e.confidence).sum::<f64>() / entries.len() as f64
    }
}

/// `agreements / max(agreements + disagreements, 1)`
pub fn agreement_ratio(agreements: usize, disagreements: usize) -> f64 {
    agreements as f64 / (agreements + disagreements).max(1) as f64
}

/// Blend the agreement ratio with the weighted confidence, clamped to [0, 1].
pub fn consensus_confidence(
    entries: &[WeightedConfidence],
    agreements: usize,
    disagreements: usize,
) -> f64 {
    clamp_score(
        AGREEMENT_SHARE * agreement_ratio(agreements, disagreements)
            + CONFIDENCE_SHARE * weighted_average_confidence(entries),
    )
}

/// Clamp a score into [0, 1]; non-finite scores become `0.0`.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wc(confidence: f64, weight: f64) -> WeightedConfidence {
        WeightedConfidence { confidence, weight }
    }

    const EPS: f64 = 1e-9;

    #[test]
    fn test_weighted_average() {
        let entries = [wc(0.9, 1.2), wc(0.85, 1.0), wc(0.88, 1.1)];
        let expected = (0.9 * 1.2 + 0.85 * 1.0 + 0.88 * 1.1) / 3.3;
        assert!((weighted_average_confidence(&entries) - expected).abs() < EPS);
    }

    #[test]
    fn test_weighted_average_empty() {
        assert_eq!(weighted_average_confidence(&[]), 0.0);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(0.42), 0.42);
        assert_eq!(clamp_score(1.7), 1.0);
        assert_eq!(clamp_score(-0.3), 0.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_agreement_ratio() {
        assert_eq!(agreement_ratio(0, 0), 0.0);
        assert_eq!(agreement_ratio(3, 0), 1.0);
        assert_eq!(agreement_ratio(1, 3), 0.25);
    }

    #[test]
    fn test_consensus_confidence_all_agree() {
        let entries = [wc(0.9, 1.0), wc(0.9, 1.0)];
        let score = consensus_confidence(&entries, 5, 0);
        assert!((score - (0.6 + 0.4 * 0.9)).abs() < EPS);
    }

    #[test]
    fn test_consensus_confidence_no_signals() {
        let entries = [wc(0.85, 1.0), wc(0.85, 1.0)];
        let score = consensus_confidence(&entries, 0, 0);
        assert!((score - 0.34).abs() < EPS);
    }

    #[test]
    fn test_consensus_confidence_clamped() {
        let entries = [wc(f64::INFINITY, 1.0)];
        assert_eq!(consensus_confidence(&entries, 1, 0), 0.0);
    }

    #[test]
    fn test_heavier_confident_provider_raises_score() {
        let light = [wc(0.95, 1.0), wc(0.7, 1.0)];
        let heavy = [wc(0.95, 3.0), wc(0.7, 1.0)];
        assert!(consensus_confidence(&heavy, 2, 1) >= consensus_confidence(&light, 2, 1));
    }
}
