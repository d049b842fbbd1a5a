//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod providers;
mod query;
mod synthesis;

pub use output::FileOutputConfig;
pub use providers::{AdapterKind, FileProviderConfig, default_providers};
pub use query::FileQueryConfig;
pub use synthesis::FileSynthesisConfig;

use council_application::{ConfigIssue, ConfigIssueCode, CouncilConfig};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Consensus thresholds
    pub synthesis: FileSynthesisConfig,
    /// Per-call parameters and time limit
    pub query: FileQueryConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Provider tables keyed by a short identifier, in key order
    pub providers: BTreeMap<String, FileProviderConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            synthesis: FileSynthesisConfig::default(),
            query: FileQueryConfig::default(),
            output: FileOutputConfig::default(),
            providers: default_providers(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks the run-wide settings via [`CouncilConfig::validate`], then
    /// every provider table: adapter kind, display name, weight, confidence,
    /// timeout and display-name uniqueness.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.to_council_config().validate();

        let mut names: HashMap<&str, &str> = HashMap::new();
        for (key, provider) in &self.providers {
            let prefix = format!("providers.{}", key);

            if let Err(e) = provider.adapter_kind() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownAdapter,
                    format!("{}.adapter: {}", prefix, e),
                ));
            }

            let name = provider.display_name_or(key);
            if name.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyDisplayName,
                    format!("{}.display_name cannot be empty", prefix),
                ));
            } else if let Some(other) = names.insert(name, key.as_str()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateDisplayName,
                    format!(
                        "display name '{}' is used by both providers.{} and {}",
                        name, other, prefix
                    ),
                ));
            }

            if !provider.weight.is_finite() || provider.weight <= 0.0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidWeight,
                    format!("{}.weight must be > 0, got {}", prefix, provider.weight),
                ));
            }

            if let Some(confidence) = provider.confidence {
                if !(0.0..=1.0).contains(&confidence) {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::InvalidConfidence,
                        format!(
                            "{}.confidence must be within [0, 1], got {}",
                            prefix, confidence
                        ),
                    ));
                }
            }

            if provider.timeout_seconds == Some(0) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroTimeout,
                    format!("{}.timeout_seconds cannot be 0", prefix),
                ));
            }
        }

        if !self.providers.values().any(|p| p.enabled) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoProvidersEnabled,
                "no provider is enabled; every query will return no answer",
            ));
        }

        issues
    }

    /// Convert to the application-level record.
    pub fn to_council_config(&self) -> CouncilConfig {
        CouncilConfig::default()
            .with_synthesis(self.synthesis.to_synthesis_config())
            .with_params(self.query.to_params())
            .with_default_timeout(self.query.timeout())
            .with_individual_responses(self.output.show_individual_responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_application::Severity;
    use council_domain::OutputFormat;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[synthesis]
strong_consensus = 0.85
weak_consensus = 0.5
enable_meta_analysis = false

[query]
max_tokens = 1024
temperature = 0.2
timeout_seconds = 30

[output]
format = "synthesis"

[providers.sonnet]
adapter = "anthropic"
display_name = "Claude Sonnet"
model = "claude-sonnet-4-5"
weight = 1.5
api_key_env = "MY_ANTHROPIC_KEY"
timeout_seconds = 60
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.synthesis.strong_consensus, 0.85);
        assert!(!config.synthesis.enable_meta_analysis);
        assert_eq!(config.output.format, Some(OutputFormat::Synthesis));
        assert_eq!(config.providers.len(), 1);

        let sonnet = &config.providers["sonnet"];
        assert_eq!(sonnet.display_name_or("sonnet"), "Claude Sonnet");
        assert_eq!(sonnet.api_key_env.as_deref(), Some("MY_ANTHROPIC_KEY"));
        assert_eq!(sonnet.timeout(), Some(Duration::from_secs(60)));

        let council = config.to_council_config();
        assert_eq!(council.synthesis.weak_threshold, 0.5);
        assert_eq!(council.params.max_tokens, Some(1024));
        assert_eq!(council.default_timeout, Duration::from_secs(30));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.providers.len(), 3);
        assert!(config.output.show_individual_responses);
        assert!(config.output.format.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_inverted_thresholds() {
        let mut config = FileConfig::default();
        config.synthesis.strong_consensus = 0.5;
        config.synthesis.weak_consensus = 0.7;

        let issues = config.validate();
        assert!(
            issues
                .iter()
                .any(|i| i.code == ConfigIssueCode::InvalidThresholds)
        );
        assert!(CouncilConfig::has_errors(&issues));
    }

    #[test]
    fn test_validate_bad_provider_tables() {
        let toml_str = r#"
[providers.a]
adapter = "bedrock"
weight = 0.0

[providers.b]
adapter = "openai"
display_name = "Same"
timeout_seconds = 0

[providers.c]
adapter = "gemini"
display_name = "Same"
confidence = 1.5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let codes: Vec<_> = config.validate().iter().map(|i| i.code).collect();

        assert!(codes.contains(&ConfigIssueCode::UnknownAdapter));
        assert!(codes.contains(&ConfigIssueCode::InvalidWeight));
        assert!(codes.contains(&ConfigIssueCode::ZeroTimeout));
        assert!(codes.contains(&ConfigIssueCode::DuplicateDisplayName));
        assert!(codes.contains(&ConfigIssueCode::InvalidConfidence));
    }

    #[test]
    fn test_validate_all_disabled_warns() {
        let mut config = FileConfig::default();
        for provider in config.providers.values_mut() {
            provider.enabled = false;
        }
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].code, ConfigIssueCode::NoProvidersEnabled);
    }
}
