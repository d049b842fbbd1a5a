//! Output formatter trait

use council_domain::{OutputFormat, SynthesisResult};

/// Trait for formatting synthesis results
pub trait OutputFormatter {
    /// Banner, individual responses, answer and meta-analysis
    fn format(&self, question: &str, result: &SynthesisResult) -> String;

    /// The whole result as JSON
    fn format_json(&self, question: &str, result: &SynthesisResult) -> String;

    /// Synthesized answer only (concise output)
    fn format_synthesis_only(&self, question: &str, result: &SynthesisResult) -> String;

    /// Dispatch on the selected format
    fn render(&self, format: OutputFormat, question: &str, result: &SynthesisResult) -> String {
        match format {
            OutputFormat::Full => self.format(question, result),
            OutputFormat::Synthesis => self.format_synthesis_only(question, result),
            OutputFormat::Json => self.format_json(question, result),
        }
    }
}
