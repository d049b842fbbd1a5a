//! Synthesis configuration from TOML (`[synthesis]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [synthesis]
//! method = "weighted_consensus"
//! strong_consensus = 0.8
//! weak_consensus = 0.6
//! enable_meta_analysis = true
//! ```

use council_domain::SynthesisConfig;
use council_domain::consensus::config::{
    DEFAULT_METHOD, DEFAULT_STRONG_THRESHOLD, DEFAULT_WEAK_THRESHOLD,
};
use serde::{Deserialize, Serialize};

/// Raw synthesis configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSynthesisConfig {
    /// Informational method name
    pub method: String,
    /// Minimum confidence for strong consensus
    pub strong_consensus: f64,
    /// Minimum confidence for moderate consensus
    pub weak_consensus: f64,
    /// Explain disagreements when they are found
    pub enable_meta_analysis: bool,
}

impl Default for FileSynthesisConfig {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD.to_string(),
            strong_consensus: DEFAULT_STRONG_THRESHOLD,
            weak_consensus: DEFAULT_WEAK_THRESHOLD,
            enable_meta_analysis: true,
        }
    }
}

impl FileSynthesisConfig {
    /// Convert to the domain record. Thresholds are not checked here.
    pub fn to_synthesis_config(&self) -> SynthesisConfig {
        SynthesisConfig {
            method: self.method.clone(),
            strong_threshold: self.strong_consensus,
            weak_threshold: self.weak_consensus,
            enable_meta_analysis: self.enable_meta_analysis,
        }
    }
}
