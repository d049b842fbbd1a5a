//! Prompt value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question to be put to the council (Value Object)
///
/// The same text is sent unchanged to every provider and is quoted back in
/// the meta-analysis when providers disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    content: String,
}

impl Prompt {
    /// Create a prompt, rejecting empty or whitespace-only text
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyPrompt)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the prompt text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner text
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Prompt {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Prompt::try_new(s)
    }
}

impl TryFrom<String> for Prompt {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Prompt::try_new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_creation() {
        let p = Prompt::try_new("What is Rust?").unwrap();
        assert_eq!(p.content(), "What is Rust?");
        assert_eq!(p.to_string(), "What is Rust?");
    }

    #[test]
    fn test_empty_prompt_rejected() {
        assert_eq!(Prompt::try_new(""), Err(DomainError::EmptyPrompt));
        assert_eq!(Prompt::try_new("  \n\t"), Err(DomainError::EmptyPrompt));
    }

    #[test]
    fn test_try_from() {
        let p: Prompt = "Explain async/await".try_into().unwrap();
        assert_eq!(p.into_content(), "Explain async/await");
    }
}
