//! Council configuration - the validated record the CLI runs with.
//!
//! [`CouncilConfig`] groups the settings that shape one run: synthesis
//! thresholds, default query parameters and the per-call time limit.
//! Infrastructure builds it from files and environment; this module only
//! checks that the combination makes sense.

use council_domain::{QueryParams, SynthesisConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeouts above this still work but usually indicate a typo
const LONG_TIMEOUT: Duration = Duration::from_secs(600);

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// Thresholds out of range or not ordered weak < strong.
    InvalidThresholds,
    /// Temperature outside [0, 2].
    InvalidTemperature,
    /// `max_tokens = 0` would make every provider return nothing.
    ZeroMaxTokens,
    /// A zero time limit times out every call.
    ZeroTimeout,
    /// Time limit longer than ten minutes.
    LongTimeout,
    /// Provider `adapter` is not one of the known kinds.
    UnknownAdapter,
    /// Provider display name is blank.
    EmptyDisplayName,
    /// Provider weight is not a positive number.
    InvalidWeight,
    /// Two providers share a display name.
    DuplicateDisplayName,
    /// Provider confidence outside [0, 1].
    InvalidConfidence,
    /// Every provider is disabled.
    NoProvidersEnabled,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}

/// Run-wide settings, validated once at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilConfig {
    pub synthesis: SynthesisConfig,
    /// Parameters forwarded to every provider
    pub params: QueryParams,
    /// Time limit for a provider without its own
    pub default_timeout: Duration,
    /// Print each provider's answer before the synthesis
    pub show_individual_responses: bool,
}

impl Default for CouncilConfig {
    fn default() -> Self {
        Self {
            synthesis: SynthesisConfig::default(),
            params: QueryParams::new()
                .with_max_tokens(DEFAULT_MAX_TOKENS)
                .with_temperature(DEFAULT_TEMPERATURE),
            default_timeout: DEFAULT_TIMEOUT,
            show_individual_responses: true,
        }
    }
}

impl CouncilConfig {
    // ==================== Builder Methods ====================

    pub fn with_synthesis(mut self, synthesis: SynthesisConfig) -> Self {
        self.synthesis = synthesis;
        self
    }

    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_individual_responses(mut self, show: bool) -> Self {
        self.show_individual_responses = show;
        self
    }

    // ==================== Validation ====================

    /// Collect every problem with this configuration.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if let Err(e) = self.synthesis.validate() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidThresholds,
                e.to_string(),
            ));
        }

        if let Some(t) = self.params.temperature {
            if !t.is_finite() || !(0.0..=2.0).contains(&t) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidTemperature,
                    format!("temperature must be within [0, 2], got {}", t),
                ));
            }
        }

        if self.params.max_tokens == Some(0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroMaxTokens,
                "max_tokens must be greater than 0",
            ));
        }

        if self.default_timeout.is_zero() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "timeout must be greater than 0 seconds",
            ));
        } else if self.default_timeout > LONG_TIMEOUT {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::LongTimeout,
                format!(
                    "timeout of {}s is unusually long",
                    self.default_timeout.as_secs()
                ),
            ));
        }

        issues
    }

    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}
