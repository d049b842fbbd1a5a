//! Consensus level definitions.
//!
//! [`ConsensusLevel`] buckets a confidence score into four ordered categories:
//! `Conflicted < Weak < Moderate < Strong`. The cut points for `Moderate` and
//! `Strong` come from [`SynthesisConfig`](super::config::SynthesisConfig);
//! the `Weak` floor is fixed at [`WEAK_FLOOR`].

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest confidence still classified as `Weak` rather than `Conflicted`
pub const WEAK_FLOOR: f64 = 0.4;

/// Discrete summary of inter-provider agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusLevel {
    /// Providers give contradictory answers
    Conflicted,
    /// Significant differences between responses
    Weak,
    /// Providers mostly agree with some variation
    Moderate,
    /// Providers largely agree
    Strong,
}

impl ConsensusLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusLevel::Conflicted => "conflicted",
            ConsensusLevel::Weak => "weak",
            ConsensusLevel::Moderate => "moderate",
            ConsensusLevel::Strong => "strong",
        }
    }

    /// Header line that opens the synthesized answer for this level
    pub fn header(&self) -> &'static str {
        match self {
            ConsensusLevel::Strong => "**Strong Consensus** - All models largely agree:",
            ConsensusLevel::Moderate => {
                "**Moderate Consensus** - Models mostly agree with some variations:"
            }
            ConsensusLevel::Weak => "**Weak Consensus** - Significant differences in responses:",
            ConsensusLevel::Conflicted => "**Conflicted** - Models have contradictory answers:",
        }
    }

    /// Short marker used when rendering the level in a terminal
    pub fn symbol(&self) -> &'static str {
        match self {
            ConsensusLevel::Strong => "[++]",
            ConsensusLevel::Moderate => "[+ ]",
            ConsensusLevel::Weak => "[? ]",
            ConsensusLevel::Conflicted => "[!!]",
        }
    }

    /// Check if the providers reached at least moderate agreement
    pub fn is_agreement(&self) -> bool {
        *self >= ConsensusLevel::Moderate
    }
}

impl fmt::Display for ConsensusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConsensusLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strong" => Ok(ConsensusLevel::Strong),
            "moderate" => Ok(ConsensusLevel::Moderate),
            "weak" => Ok(ConsensusLevel::Weak),
            "conflicted" => Ok(ConsensusLevel::Conflicted),
            _ => Err(DomainError::InvalidConsensusLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(ConsensusLevel::Conflicted < ConsensusLevel::Weak);
        assert!(ConsensusLevel::Weak < ConsensusLevel::Moderate);
        assert!(ConsensusLevel::Moderate < ConsensusLevel::Strong);
    }

    #[test]
    fn test_display_and_from_str() {
        for level in [
            ConsensusLevel::Strong,
            ConsensusLevel::Moderate,
            ConsensusLevel::Weak,
            ConsensusLevel::Conflicted,
        ] {
            assert_eq!(level.to_string().parse::<ConsensusLevel>().unwrap(), level);
        }
        assert_eq!("STRONG".parse::<ConsensusLevel>().unwrap(), ConsensusLevel::Strong);
        assert!("unanimous".parse::<ConsensusLevel>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ConsensusLevel::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");
    }

    #[test]
    fn test_is_agreement() {
        assert!(ConsensusLevel::Strong.is_agreement());
        assert!(ConsensusLevel::Moderate.is_agreement());
        assert!(!ConsensusLevel::Weak.is_agreement());
        assert!(!ConsensusLevel::Conflicted.is_agreement());
    }
}
