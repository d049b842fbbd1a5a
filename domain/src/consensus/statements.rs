//! Key statement extraction.
//!
//! A key statement is a sentence-like fragment of a response that is long
//! enough to carry a claim. Statements are the unit compared by the
//! agreement and disagreement scans.

use regex::Regex;
use std::sync::LazyLock;

/// Sentences must be strictly longer than this many characters to count
pub const MIN_STATEMENT_CHARS: usize = 20;

/// At most this many statements are kept per response
pub const MAX_STATEMENTS: usize = 10;

/// Statements opening with one of these are treated as qualifications, not claims
pub const CONTRASTIVE_OPENERS: &[&str] = &["However", "But", "Although"];

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence break pattern is valid"));

/// The key statements of one provider's response, in original order
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderStatements {
    pub provider: String,
    pub statements: Vec<String>,
}

impl ProviderStatements {
    pub fn from_content(provider: impl Into<String>, content: &str) -> Self {
        Self {
            provider: provider.into(),
            statements: extract_key_statements(content),
        }
    }
}

/// Split `content` on terminal punctuation and keep the first
/// [`MAX_STATEMENTS`] fragments that look like claims.
pub fn extract_key_statements(content: &str) -> Vec<String> {
    SENTENCE_BREAK
        .split(content)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_STATEMENT_CHARS)
        .filter(|s| !CONTRASTIVE_OPENERS.iter().any(|opener| s.starts_with(opener)))
        .take(MAX_STATEMENTS)
        .map(str::to_string)
        .collect()
}
