//! Console output formatter for council results

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use council_domain::core::string::truncate_with_ellipsis;
use council_domain::{ConsensusLevel, ProviderView, SynthesisResult};
use serde::Serialize;

/// Individual responses are cut to this many characters in full output
pub const PREVIEW_CHARS: usize = 500;

/// JSON document printed by `-o json`
#[derive(Serialize)]
struct JsonReport<'a> {
    question: &'a str,
    #[serde(flatten)]
    result: &'a SynthesisResult,
}

/// Formats synthesis results for console display
pub struct ConsoleFormatter {
    show_individual: bool,
}

impl Default for ConsoleFormatter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConsoleFormatter {
    pub fn new(show_individual: bool) -> Self {
        Self { show_individual }
    }

    /// Format the complete result
    pub fn format_full(&self, question: &str, result: &SynthesisResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Council Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Question:".cyan().bold(), question));
        output.push_str(&Self::banner(result));
        output.push('\n');

        if self.show_individual && !result.per_provider_view.is_empty() {
            output.push_str(&Self::section_header("Individual Responses"));
            for view in &result.per_provider_view {
                output.push_str(&Self::view(view));
            }
        }

        output.push_str(&Self::section_header("Synthesized Answer"));
        output.push('\n');
        output.push_str(&result.synthesized_answer);
        output.push('\n');

        if let Some(meta) = &result.meta_analysis {
            output.push_str(&Self::section_header("Meta-Analysis"));
            output.push('\n');
            output.push_str(meta);
            output.push('\n');
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as pretty JSON with the question alongside the result
    pub fn format_json_report(question: &str, result: &SynthesisResult) -> String {
        serde_json::to_string_pretty(&JsonReport { question, result })
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format synthesis only (concise output)
    pub fn format_synthesis(question: &str, result: &SynthesisResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== LLM Council Conclusion ===".cyan().bold()
        ));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), question));

        let consulted: Vec<&str> = result
            .successful_views()
            .map(|v| v.name.as_str())
            .collect();
        if !consulted.is_empty() {
            output.push_str(&format!(
                "{} {}\n\n",
                "Models consulted:".dimmed(),
                consulted.join(", ")
            ));
        }

        output.push_str(&result.synthesized_answer);
        output.push('\n');
        output
    }

    /// `[++] STRONG CONSENSUS (Confidence: 87.5%)`
    pub fn banner(result: &SynthesisResult) -> String {
        let level = result.consensus_level;
        let text = format!(
            "{} {} CONSENSUS (Confidence: {:.1}%)",
            level.symbol(),
            level.as_str().to_uppercase(),
            result.confidence_score * 100.0
        );
        format!("{}\n", Self::level_color(level, &text).bold())
    }

    fn view(view: &ProviderView) -> String {
        let title = format!(
            "── {} (confidence: {:.0}%, weight: {}) ──",
            view.name,
            view.confidence * 100.0,
            view.weight
        );

        if view.success {
            let latency = view
                .latency_ms
                .map(|ms| format!(" {}", format!("[{:.0}ms]", ms).dimmed()))
                .unwrap_or_default();
            format!(
                "\n{}{}\n{}\n",
                title.yellow().bold(),
                latency,
                truncate_with_ellipsis(&view.content, PREVIEW_CHARS)
            )
        } else {
            format!(
                "\n{}\nError: {}\n",
                title.red().bold(),
                view.error.as_deref().unwrap_or("Unknown")
            )
        }
    }

    fn level_color(level: ConsensusLevel, text: &str) -> ColoredString {
        match level {
            ConsensusLevel::Strong => text.green(),
            ConsensusLevel::Moderate => text.yellow(),
            ConsensusLevel::Weak => text.magenta(),
            ConsensusLevel::Conflicted => text.red(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, question: &str, result: &SynthesisResult) -> String {
        self.format_full(question, result)
    }

    fn format_json(&self, question: &str, result: &SynthesisResult) -> String {
        Self::format_json_report(question, result)
    }

    fn format_synthesis_only(&self, question: &str, result: &SynthesisResult) -> String {
        Self::format_synthesis(question, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{OutputFormat, QueryOutcome};

    fn sample_result() -> SynthesisResult {
        let long = "x".repeat(PREVIEW_CHARS + 50);
        let views = vec![
            ProviderView::from_outcome(
                &QueryOutcome::success("Claude", long)
                    .with_confidence(0.9)
                    .with_latency_ms(420.0),
                1.2,
            ),
            ProviderView::from_outcome(&QueryOutcome::timeout("Gemini"), 1.0),
        ];
        SynthesisResult {
            consensus_level: ConsensusLevel::Strong,
            confidence_score: 0.875,
            synthesized_answer: "Use Result and the ? operator.".to_string(),
            per_provider_view: views,
            agreements: vec![],
            disagreements: vec![],
            meta_analysis: None,
        }
    }

    #[test]
    fn test_banner_shows_level_and_percentage() {
        colored::control::set_override(false);
        let banner = ConsoleFormatter::banner(&sample_result());
        assert_eq!(banner, "[++] STRONG CONSENSUS (Confidence: 87.5%)\n");
    }

    #[test]
    fn test_full_output_truncates_individual_responses() {
        colored::control::set_override(false);
        let out = ConsoleFormatter::new(true).format_full("How to handle errors?", &sample_result());

        assert!(out.contains("Question: How to handle errors?"));
        assert!(out.contains("Claude (confidence: 90%, weight: 1.2)"));
        assert!(out.contains(&format!("{}...", "x".repeat(PREVIEW_CHARS))));
        assert!(!out.contains(&"x".repeat(PREVIEW_CHARS + 1)));
        assert!(out.contains("Error: timeout"));
        assert!(out.contains("Use Result and the ? operator."));
        assert!(!out.contains("Meta-Analysis"));
    }

    #[test]
    fn test_hide_individual() {
        colored::control::set_override(false);
        let out = ConsoleFormatter::new(false).format_full("q", &sample_result());
        assert!(!out.contains("Individual Responses"));
        assert!(out.contains("Synthesized Answer"));
    }

    #[test]
    fn test_meta_analysis_section() {
        colored::control::set_override(false);
        let mut result = sample_result();
        result.meta_analysis = Some("**Meta-Analysis of Disagreements:**".to_string());
        let out = ConsoleFormatter::default().format_full("q", &result);
        assert!(out.contains("**Meta-Analysis of Disagreements:**"));
    }

    #[test]
    fn test_synthesis_only_lists_successful_models() {
        colored::control::set_override(false);
        let out = ConsoleFormatter::format_synthesis("q", &sample_result());
        assert!(out.contains("Models consulted: Claude\n"));
        assert!(out.ends_with("Use Result and the ? operator.\n"));
    }

    #[test]
    fn test_json_report() {
        let formatter = ConsoleFormatter::default();
        let json = formatter.render(OutputFormat::Json, "Why Rust?", &sample_result());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["question"], "Why Rust?");
        assert_eq!(value["consensus_level"], "strong");
        assert_eq!(value["per_provider_view"].as_array().unwrap().len(), 2);
        assert_eq!(value["per_provider_view"][1]["error"], "timeout");
    }

    #[test]
    fn test_no_answer_renders() {
        colored::control::set_override(false);
        let result = SynthesisResult::no_answer("No providers available");
        let out = ConsoleFormatter::default().format_full("q", &result);
        assert!(out.contains("[!!] CONFLICTED CONSENSUS (Confidence: 0.0%)"));
        assert!(out.contains("Error: No providers available"));
    }
}
