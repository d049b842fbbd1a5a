//! Synthesis configuration - thresholds and feature switches.

use super::level::{ConsensusLevel, WEAK_FLOOR};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_METHOD: &str = "weighted_consensus";
pub const DEFAULT_STRONG_THRESHOLD: f64 = 0.8;
pub const DEFAULT_WEAK_THRESHOLD: f64 = 0.6;

/// Configuration consumed by the consensus synthesizer.
///
/// `weak_threshold` is the lower bound of `Moderate`, `strong_threshold` the
/// lower bound of `Strong`. A config is only meaningful when
/// `weak_threshold < strong_threshold`; [`SynthesisConfig::validate`] enforces
/// that before any query runs.
///
/// # Example
///
/// ```
/// use council_domain::{ConsensusLevel, SynthesisConfig};
///
/// let config = SynthesisConfig::default();
/// assert_eq!(config.classify(0.85), ConsensusLevel::Strong);
/// assert_eq!(config.classify(0.6), ConsensusLevel::Moderate);
///
/// assert!(SynthesisConfig::new(0.5, 0.7).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Informational name of the synthesis method
    pub method: String,
    /// Minimum confidence for `Strong`
    pub strong_threshold: f64,
    /// Minimum confidence for `Moderate`
    pub weak_threshold: f64,
    /// Produce a meta-analysis when disagreements are found
    pub enable_meta_analysis: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD.to_string(),
            strong_threshold: DEFAULT_STRONG_THRESHOLD,
            weak_threshold: DEFAULT_WEAK_THRESHOLD,
            enable_meta_analysis: true,
        }
    }
}

impl SynthesisConfig {
    /// Create a validated config with the given thresholds
    pub fn new(strong_threshold: f64, weak_threshold: f64) -> Result<Self, DomainError> {
        let config = Self {
            strong_threshold,
            weak_threshold,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_meta_analysis(mut self, enabled: bool) -> Self {
        self.enable_meta_analysis = enabled;
        self
    }

    /// Check threshold sanity: both finite, within [0, 1], weak < strong.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in [
            ("strong_threshold", self.strong_threshold),
            ("weak_threshold", self.weak_threshold),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DomainError::InvalidThresholds(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.weak_threshold >= self.strong_threshold {
            return Err(DomainError::InvalidThresholds(format!(
                "weak_threshold ({}) must be lower than strong_threshold ({})",
                self.weak_threshold, self.strong_threshold
            )));
        }
        Ok(())
    }

    /// Map a confidence score onto a consensus level, highest bucket first.
    pub fn classify(&self, confidence: f64) -> ConsensusLevel {
        if confidence >= self.strong_threshold {
            ConsensusLevel::Strong
        } else if confidence >= self.weak_threshold {
            ConsensusLevel::Moderate
        } else if confidence >= WEAK_FLOOR {
            ConsensusLevel::Weak
        } else {
            ConsensusLevel::Conflicted
        }
    }
}
