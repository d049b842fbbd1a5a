//! Provider configuration from TOML (`[providers.<key>]` sections)
//!
//! Example configuration:
//!
//! ```toml
//! [providers.claude]
//! adapter = "anthropic"
//! display_name = "Claude"
//! model = "claude-sonnet-4-20250514"
//! weight = 1.2
//! api_key_env = "ANTHROPIC_API_KEY"
//! ```

use council_domain::DEFAULT_WEIGHT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which HTTP adapter serves a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    /// Anthropic Messages API
    Anthropic,
    /// OpenAI-compatible chat completions (OpenAI, OpenRouter)
    OpenAi,
    /// Google Gemini generateContent API
    Gemini,
}

impl AdapterKind {
    pub const VALID_VALUES: &'static [&'static str] = &["anthropic", "openai", "gemini"];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterKind::Anthropic => "anthropic",
            AdapterKind::OpenAi => "openai",
            AdapterKind::Gemini => "gemini",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdapterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(AdapterKind::Anthropic),
            "openai" | "openrouter" => Ok(AdapterKind::OpenAi),
            "gemini" | "google" => Ok(AdapterKind::Gemini),
            other => Err(format!(
                "unknown adapter '{}', expected one of: {}",
                other,
                Self::VALID_VALUES.join(", ")
            )),
        }
    }
}

/// One `[providers.<key>]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Adapter kind: "anthropic", "openai" or "gemini"
    pub adapter: String,
    /// Name shown in output; the table key when absent
    pub display_name: Option<String>,
    /// Model identifier sent to the API; adapter default when absent
    pub model: Option<String>,
    /// Relative trust weight, must be > 0
    pub weight: f64,
    pub enabled: bool,
    /// Environment variable holding the API key; adapter default when absent
    pub api_key_env: Option<String>,
    /// Override the API base URL (proxies, tests)
    pub base_url: Option<String>,
    /// Per-provider time limit; `[query] timeout_seconds` when absent
    pub timeout_seconds: Option<u64>,
    /// Confidence reported with every answer; adapter default when absent
    pub confidence: Option<f64>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            adapter: String::new(),
            display_name: None,
            model: None,
            weight: DEFAULT_WEIGHT,
            enabled: true,
            api_key_env: None,
            base_url: None,
            timeout_seconds: None,
            confidence: None,
        }
    }
}

impl FileProviderConfig {
    pub fn new(adapter: AdapterKind, display_name: &str, model: &str, weight: f64) -> Self {
        Self {
            adapter: adapter.as_str().to_string(),
            display_name: Some(display_name.to_string()),
            model: Some(model.to_string()),
            weight,
            ..Self::default()
        }
    }

    pub fn adapter_kind(&self) -> Result<AdapterKind, String> {
        self.adapter.parse()
    }

    /// Display name, falling back to the table key
    pub fn display_name_or<'a>(&'a self, key: &'a str) -> &'a str {
        self.display_name.as_deref().unwrap_or(key)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// The three providers shipped in the built-in configuration
pub fn default_providers() -> BTreeMap<String, FileProviderConfig> {
    BTreeMap::from([
        (
            "claude".to_string(),
            FileProviderConfig::new(
                AdapterKind::Anthropic,
                "Claude",
                "claude-sonnet-4-20250514",
                1.2,
            ),
        ),
        (
            "gemini".to_string(),
            FileProviderConfig::new(AdapterKind::Gemini, "Gemini", "gemini-2.5-flash", 1.0),
        ),
        (
            "gpt4".to_string(),
            FileProviderConfig::new(AdapterKind::OpenAi, "GPT-4", "openai/gpt-4-turbo", 1.1),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_aliases() {
        assert_eq!("Anthropic".parse::<AdapterKind>(), Ok(AdapterKind::Anthropic));
        assert_eq!("openrouter".parse::<AdapterKind>(), Ok(AdapterKind::OpenAi));
        assert_eq!("google".parse::<AdapterKind>(), Ok(AdapterKind::Gemini));
        assert!("bedrock".parse::<AdapterKind>().is_err());
    }

    #[test]
    fn test_provider_table_defaults() {
        let toml_str = r#"
adapter = "gemini"
"#;
        let config: FileProviderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.adapter_kind(), Ok(AdapterKind::Gemini));
        assert_eq!(config.weight, 1.0);
        assert!(config.enabled);
        assert_eq!(config.display_name_or("flash"), "flash");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_default_providers() {
        let providers = default_providers();
        assert_eq!(providers.len(), 3);
        assert_eq!(providers["claude"].weight, 1.2);
        assert_eq!(providers["gemini"].display_name_or("gemini"), "Gemini");
        assert_eq!(providers["gpt4"].adapter_kind(), Ok(AdapterKind::OpenAi));
    }
}
