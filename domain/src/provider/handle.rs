//! Provider handle value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default relative weight of a provider
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// One configured provider (Value Object)
///
/// Carries the identity and trust weight of an answer source. Handles are
/// built once at start-up and stay immutable for the whole run.
///
/// # Example
///
/// ```
/// use council_domain::ProviderHandle;
///
/// let handle = ProviderHandle::new("Claude Sonnet", 1.2).unwrap();
/// assert_eq!(handle.weight(), 1.2);
/// assert!(handle.is_enabled());
///
/// assert!(ProviderHandle::new("Broken", 0.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderHandle {
    display_name: String,
    weight: f64,
    enabled: bool,
}

impl ProviderHandle {
    /// Create an enabled handle with the given weight
    pub fn new(display_name: impl Into<String>, weight: f64) -> Result<Self, DomainError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(DomainError::InvalidProvider(
                "display name cannot be empty".to_string(),
            ));
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(DomainError::InvalidWeight {
                name: display_name,
                weight,
            });
        }
        Ok(Self {
            display_name,
            weight,
            enabled: true,
        })
    }

    /// Create an enabled handle with [`DEFAULT_WEIGHT`]
    pub fn with_default_weight(display_name: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(display_name, DEFAULT_WEIGHT)
    }

    /// Set the enabled flag
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl std::fmt::Display for ProviderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (weight {})", self.display_name, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_handle() {
        let handle = ProviderHandle::new("Gemini Flash", 1.0).unwrap();
        assert_eq!(handle.display_name(), "Gemini Flash");
        assert!(handle.is_enabled());
    }

    #[test]
    fn test_default_weight() {
        let handle = ProviderHandle::with_default_weight("GPT").unwrap();
        assert_eq!(handle.weight(), DEFAULT_WEIGHT);
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        assert!(matches!(
            ProviderHandle::new("A", 0.0),
            Err(DomainError::InvalidWeight { .. })
        ));
        assert!(matches!(
            ProviderHandle::new("A", -1.5),
            Err(DomainError::InvalidWeight { .. })
        ));
        assert!(matches!(
            ProviderHandle::new("A", f64::NAN),
            Err(DomainError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_name() {
        assert!(matches!(
            ProviderHandle::new("   ", 1.0),
            Err(DomainError::InvalidProvider(_))
        ));
    }

    #[test]
    fn test_disable() {
        let handle = ProviderHandle::new("A", 1.0).unwrap().with_enabled(false);
        assert!(!handle.is_enabled());
    }
}
