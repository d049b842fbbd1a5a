//! Disagreement detection by opposing keywords.

use super::statements::ProviderStatements;
use crate::core::string::take_chars;

/// Positive/negative keyword pairs, matched as case-insensitive substrings
pub const ANTONYM_PAIRS: &[(&str, &str)] = &[
    ("yes", "no"),
    ("true", "false"),
    ("correct", "incorrect"),
    ("should", "should not"),
    ("can", "cannot"),
    ("will", "will not"),
    ("always", "never"),
];

/// At most this many disagreement strings are reported
pub const MAX_DISAGREEMENTS: usize = 5;

/// Statements are quoted up to this many characters
pub const QUOTE_CHARS: usize = 100;

/// Compare every statement of one provider with every statement of another
/// and report pairs where the first says a positive keyword and the second
/// says its negation.
///
/// A provider pair is visited once, with the lexicographically smaller name
/// on the positive side. Each statement pair yields at most one entry.
/// A positive term held only by the larger name is never reported.
pub fn find_disagreements(sets: &[ProviderStatements]) -> Vec<String> {
    let lowered: Vec<Vec<String>> = sets
        .iter()
        .map(|set| set.statements.iter().map(|s| s.to_lowercase()).collect())
        .collect();

    let mut disagreements = Vec::new();

    for (i, first) in sets.iter().enumerate() {
        for (j, second) in sets.iter().enumerate() {
            if first.provider >= second.provider {
                continue;
            }

            for (stmt1, lower1) in first.statements.iter().zip(&lowered[i]) {
                for (stmt2, lower2) in second.statements.iter().zip(&lowered[j]) {
                    let opposed = ANTONYM_PAIRS
                        .iter()
                        .any(|(pos, neg)| lower1.contains(pos) && lower2.contains(neg));

                    if opposed {
                        disagreements.push(format!(
                            "{} says: {}...\n  vs {} says: {}...",
                            first.provider,
                            take_chars(stmt1, QUOTE_CHARS),
                            second.provider,
                            take_chars(stmt2, QUOTE_CHARS),
                        ));
                        if disagreements.len() == MAX_DISAGREEMENTS {
                            return disagreements;
                        }
                    }
                }
            }
        }
    }

    disagreements
}
