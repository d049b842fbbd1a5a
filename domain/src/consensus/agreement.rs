//! Agreement detection by shared significant words.

use super::statements::ProviderStatements;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Fraction of valid providers that must mention a word for it to count
pub const AGREEMENT_RATIO: f64 = 0.6;

/// At most this many agreement strings are reported
pub const MAX_AGREEMENTS: usize = 5;

static SIGNIFICANT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w{5,}\b").expect("significant word pattern is valid"));

#[derive(Default)]
struct WordMentions<'a> {
    providers: Vec<&'a str>,
    first_statement: &'a str,
}

/// Find words of five or more characters that at least
/// [`AGREEMENT_RATIO`] of providers mention, and quote the first statement
/// each one appeared in.
///
/// Words are visited in first-seen order over providers and their
/// statements, so the output only depends on the input ordering.
pub fn find_agreements(sets: &[ProviderStatements]) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut mentions: HashMap<String, WordMentions<'_>> = HashMap::new();

    for set in sets {
        for statement in &set.statements {
            for word in SIGNIFICANT_WORD.find_iter(statement) {
                let word = word.as_str().to_lowercase();
                let entry = mentions.entry(word.clone()).or_insert_with(|| {
                    order.push(word);
                    WordMentions {
                        providers: Vec::new(),
                        first_statement: statement,
                    }
                });
                if !entry.providers.contains(&set.provider.as_str()) {
                    entry.providers.push(&set.provider);
                }
            }
        }
    }

    let required = sets.len() as f64 * AGREEMENT_RATIO;

    order
        .iter()
        .filter_map(|word| mentions.get(word))
        .filter(|m| m.providers.len() as f64 >= required)
        .take(MAX_AGREEMENTS)
        .map(|m| format!("Multiple models agree: {}", m.first_statement))
        .collect()
}
