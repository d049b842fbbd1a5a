//! Meta-analysis: lexical hints about why providers disagree.

/// Responses shorter than this many characters count as brief
pub const BRIEF_RESPONSE_CHARS: usize = 200;

pub const REASON_SUBJECTIVE: &str = "- Question involves subjective interpretation";
pub const REASON_VERBOSITY: &str = "- Some models gave brief answers vs detailed ones";
pub const REASON_CONTEXT: &str = "- Context-dependent answer with multiple valid approaches";
pub const RECOMMENDATION: &str =
    "**Recommendation:** Review individual responses for nuanced perspectives.";

/// Build the meta-analysis text for a query whose providers disagreed.
///
/// `contents` are the valid responses in input order. The recommendation
/// line is always present, even when no heuristic fires.
pub fn meta_analysis(prompt: &str, contents: &[&str], disagreement_count: usize) -> String {
    let mut lines = vec![
        "**Meta-Analysis: Why Models Disagree**\n".to_string(),
        format!("Original Question: {}\n", prompt),
        format!("Number of Models: {}", contents.len()),
        format!("Disagreements Found: {}\n", disagreement_count),
        "**Possible Reasons:**".to_string(),
    ];

    let combined = contents.join(" ").to_lowercase();

    if combined.contains("opinion") || combined.contains("subjective") {
        lines.push(REASON_SUBJECTIVE.to_string());
    }

    let lengths: Vec<usize> = contents.iter().map(|c| c.chars().count()).collect();
    let has_brief = lengths.iter().any(|&n| n < BRIEF_RESPONSE_CHARS);
    let has_detailed = lengths.iter().any(|&n| n >= BRIEF_RESPONSE_CHARS);
    if has_brief && has_detailed {
        lines.push(REASON_VERBOSITY.to_string());
    }

    if combined.contains("it depends") {
        lines.push(REASON_CONTEXT.to_string());
    }

    lines.push(format!("\n{}", RECOMMENDATION));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_recommendation_always_present() {
        let text = meta_analysis("Tabs or spaces?", &["Tabs.", "Spaces."], 1);
        assert!(text.starts_with("**Meta-Analysis: Why Models Disagree**"));
        assert!(text.contains("Original Question: Tabs or spaces?"));
        assert!(text.contains("Number of Models: 2"));
        assert!(text.contains("Disagreements Found: 1"));
        assert!(text.ends_with(RECOMMENDATION));
        assert!(!text.contains(REASON_SUBJECTIVE));
        assert!(!text.contains(REASON_CONTEXT));
    }

    #[test]
    fn test_subjective_hint() {
        let text = meta_analysis("q", &["In my OPINION tabs win.", "Spaces."], 1);
        assert!(text.contains(REASON_SUBJECTIVE));
    }

    #[test]
    fn test_context_hint() {
        let text = meta_analysis("q", &["It depends on your team.", "Spaces."], 1);
        assert!(text.contains(REASON_CONTEXT));
    }

    #[test]
    fn test_verbosity_needs_both_brief_and_detailed() {
        let detailed = "x".repeat(250);
        let mixed = meta_analysis("q", &["Short answer.", &detailed], 1);
        assert!(mixed.contains(REASON_VERBOSITY));

        let all_brief = meta_analysis("q", &["Short.", "Also short."], 1);
        assert!(!all_brief.contains(REASON_VERBOSITY));

        let all_detailed = meta_analysis("q", &[&detailed, &detailed], 1);
        assert!(!all_detailed.contains(REASON_VERBOSITY));
    }
}
