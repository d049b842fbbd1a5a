//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These only surface for programming or configuration mistakes detected
/// before a query fans out. Provider failures never become a `DomainError`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    #[error("Invalid provider: {0}")]
    InvalidProvider(String),

    #[error("Invalid weight for provider '{name}': {weight} (must be > 0)")]
    InvalidWeight { name: String, weight: f64 },

    #[error("Duplicate provider display name: {0}")]
    DuplicateProvider(String),

    #[error("Invalid consensus thresholds: {0}")]
    InvalidThresholds(String),

    #[error("Invalid consensus level: {0}")]
    InvalidConsensusLevel(String),
}

impl DomainError {
    /// Check if this error comes from threshold validation
    pub fn is_threshold_error(&self) -> bool {
        matches!(self, DomainError::InvalidThresholds(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_weight_display() {
        let error = DomainError::InvalidWeight {
            name: "Claude".to_string(),
            weight: 0.0,
        };
        assert_eq!(
            error.to_string(),
            "Invalid weight for provider 'Claude': 0 (must be > 0)"
        );
    }

    #[test]
    fn test_is_threshold_error() {
        assert!(DomainError::InvalidThresholds("weak >= strong".into()).is_threshold_error());
        assert!(!DomainError::EmptyPrompt.is_threshold_error());
        assert!(!DomainError::DuplicateProvider("Gemini".into()).is_threshold_error());
    }
}
