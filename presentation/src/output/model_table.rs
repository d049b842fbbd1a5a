//! Provider listing for `--list-models`

use colored::Colorize;
use council_application::CouncilMember;
use std::time::Duration;

/// Renders council members with availability, weight and time limit
pub struct ModelTable;

impl ModelTable {
    pub fn format(members: &[CouncilMember], default_timeout: Duration) -> String {
        let width = members
            .iter()
            .map(|m| m.name().chars().count())
            .max()
            .unwrap_or(0)
            .max("Model".len());

        let mut output = format!("{}\n\n", "LLM Council Models".cyan().bold());
        output.push_str(&format!(
            "  {:<width$}  {:<15}  {:>6}  {:>8}\n",
            "Model", "Status", "Weight", "Timeout"
        ));
        output.push_str(&format!("  {}\n", "-".repeat(width + 37)));

        for member in members {
            let status = Self::status(member);
            let timeout = member.timeout.unwrap_or(default_timeout);
            output.push_str(&format!(
                "  {:<width$}  {}  {:>6}  {:>7}s\n",
                member.name(),
                status,
                format!("{:.1}", member.handle.weight()),
                timeout.as_secs()
            ));
        }

        if members.iter().any(|m| m.handle.is_enabled() && !m.is_available()) {
            output.push_str(&format!(
                "\n{}\n",
                "Some models are unavailable. Check your API keys:".yellow()
            ));
            output.push_str("  - Claude:     ANTHROPIC_API_KEY\n");
            output.push_str("  - Gemini:     GEMINI_API_KEY or GOOGLE_API_KEY\n");
            output.push_str("  - OpenRouter: OPENROUTER_API_KEY (or OPENAI_API_KEY)\n");
        }

        output
    }

    // Padded before coloring so ANSI codes do not skew the columns
    fn status(member: &CouncilMember) -> String {
        if !member.handle.is_enabled() {
            format!("{:<15}", "- Disabled").dimmed().to_string()
        } else if member.is_available() {
            format!("{:<15}", "v Available").green().to_string()
        } else {
            format!("{:<15}", "x Not available").red().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use council_application::{Provider, ProviderError};
    use council_domain::{ProviderHandle, QueryOutcome, QueryParams};
    use std::sync::Arc;

    struct StubProvider(bool);

    #[async_trait]
    impl Provider for StubProvider {
        fn is_usable(&self) -> bool {
            self.0
        }

        async fn query(
            &self,
            _prompt: &str,
            _params: &QueryParams,
        ) -> Result<QueryOutcome, ProviderError> {
            Err(ProviderError::Other("not used".to_string()))
        }
    }

    fn member(name: &str, weight: f64, usable: bool, enabled: bool) -> CouncilMember {
        let handle = ProviderHandle::new(name, weight).unwrap().with_enabled(enabled);
        CouncilMember::new(handle, Arc::new(StubProvider(usable)))
    }

    #[test]
    fn test_lists_every_member() {
        colored::control::set_override(false);
        let members = vec![
            member("Claude", 1.2, true, true),
            member("Gemini", 1.0, false, true),
            member("GPT-4", 1.1, true, false).with_timeout(Duration::from_secs(30)),
        ];
        let out = ModelTable::format(&members, Duration::from_secs(120));

        assert!(out.contains("Claude  v Available"));
        assert!(out.contains("Gemini  x Not available"));
        assert!(out.contains("GPT-4   - Disabled"));
        assert!(out.contains("   1.2"));
        assert!(out.contains("120s"));
        assert!(out.contains("30s"));
        assert!(out.contains("Check your API keys"));
    }

    #[test]
    fn test_no_key_hint_when_all_usable() {
        colored::control::set_override(false);
        let out = ModelTable::format(&[member("Claude", 1.0, true, true)], Duration::from_secs(60));
        assert!(!out.contains("Check your API keys"));
    }
}
