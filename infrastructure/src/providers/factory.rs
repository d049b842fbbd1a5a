//! Builds council members from `[providers.<key>]` tables

use super::credentials::Credentials;
use super::http::HttpProviderConfig;
use super::{anthropic, gemini, openai_compatible};
use super::{AnthropicProvider, GeminiProvider, OpenAiCompatibleProvider};
use crate::config::{AdapterKind, ConfigError, FileConfig, FileProviderConfig};
use council_application::{CouncilMember, Provider};
use council_domain::ProviderHandle;
use std::sync::Arc;
use tracing::debug;

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Turns provider tables into [`CouncilMember`]s.
///
/// API keys are read through the lookup once per provider, here. The
/// default lookup is the process environment.
pub struct ProviderFactory {
    lookup: EnvLookup,
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderFactory {
    pub fn new() -> Self {
        Self {
            lookup: Box::new(|name| std::env::var(name).ok()),
        }
    }

    /// Resolve keys through `lookup` instead of the process environment
    pub fn with_env_lookup(
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            lookup: Box::new(lookup),
        }
    }

    /// Build every provider table, in key order
    pub fn build_all(&self, config: &FileConfig) -> Result<Vec<CouncilMember>, ConfigError> {
        config
            .providers
            .iter()
            .map(|(key, provider)| self.build(key, provider))
            .collect()
    }

    /// Build one member. Disabled tables still yield a member (with a
    /// disabled handle) so they can be listed.
    pub fn build(
        &self,
        key: &str,
        config: &FileProviderConfig,
    ) -> Result<CouncilMember, ConfigError> {
        let kind = config
            .adapter_kind()
            .map_err(|message| ConfigError::UnknownAdapter {
                key: key.to_string(),
                message,
            })?;

        let name = config.display_name_or(key);
        let handle = ProviderHandle::new(name, config.weight)
            .map_err(|source| ConfigError::InvalidProvider {
                key: key.to_string(),
                source,
            })?
            .with_enabled(config.enabled);

        let credentials = self.credentials(kind, config);
        let http_config = self.http_config(key, kind, name, config, credentials)?;
        debug!(
            "provider {} ({}): model={} base_url={} key_from={:?}",
            key,
            kind,
            http_config.model,
            http_config.base_url,
            http_config.credentials.source()
        );

        let client_error = |source| ConfigError::Client {
            key: key.to_string(),
            source,
        };
        let provider: Arc<dyn Provider> = match kind {
            AdapterKind::Anthropic => {
                Arc::new(AnthropicProvider::new(http_config).map_err(client_error)?)
            }
            AdapterKind::OpenAi => {
                Arc::new(OpenAiCompatibleProvider::new(http_config).map_err(client_error)?)
            }
            AdapterKind::Gemini => Arc::new(GeminiProvider::new(http_config).map_err(client_error)?),
        };

        let member = CouncilMember::new(handle, provider);
        Ok(match config.timeout() {
            Some(timeout) => member.with_timeout(timeout),
            None => member,
        })
    }

    fn credentials(&self, kind: AdapterKind, config: &FileProviderConfig) -> Credentials {
        match config.api_key_env.as_deref() {
            Some(var) => Credentials::resolve(&[var], &self.lookup),
            None => {
                let vars = match kind {
                    AdapterKind::Anthropic => anthropic::API_KEY_VARS,
                    AdapterKind::OpenAi => openai_compatible::API_KEY_VARS,
                    AdapterKind::Gemini => gemini::API_KEY_VARS,
                };
                Credentials::resolve(vars, &self.lookup)
            }
        }
    }

    fn http_config(
        &self,
        key: &str,
        kind: AdapterKind,
        name: &str,
        config: &FileProviderConfig,
        credentials: Credentials,
    ) -> Result<HttpProviderConfig, ConfigError> {
        let (default_url, default_model, default_confidence) = match kind {
            AdapterKind::Anthropic => (
                anthropic::BASE_URL,
                anthropic::DEFAULT_MODEL,
                anthropic::DEFAULT_CONFIDENCE,
            ),
            AdapterKind::Gemini => (
                gemini::BASE_URL,
                gemini::DEFAULT_MODEL,
                gemini::DEFAULT_CONFIDENCE,
            ),
            // A bare OpenAI key talks to OpenAI itself rather than OpenRouter
            AdapterKind::OpenAi if credentials.source() == Some(openai_compatible::OPENAI_KEY_VAR) => (
                openai_compatible::OPENAI_BASE_URL,
                openai_compatible::DEFAULT_MODEL,
                openai_compatible::DEFAULT_CONFIDENCE,
            ),
            AdapterKind::OpenAi => (
                openai_compatible::OPENROUTER_BASE_URL,
                openai_compatible::DEFAULT_MODEL,
                openai_compatible::DEFAULT_CONFIDENCE,
            ),
        };

        let base_url = config.base_url.as_deref().unwrap_or(default_url);
        let mut model = config
            .model
            .clone()
            .unwrap_or_else(|| default_model.to_string());
        if kind == AdapterKind::OpenAi {
            model = openai_compatible::normalize_model_id(&model, base_url).map_err(|message| {
                ConfigError::UnsupportedModel {
                    key: key.to_string(),
                    message,
                }
            })?;
        }

        let mut http_config = HttpProviderConfig::new(
            name,
            model,
            base_url,
            config.confidence.unwrap_or(default_confidence),
        )
        .with_credentials(credentials);
        if let Some(timeout) = config.timeout() {
            http_config = http_config.with_timeout(timeout);
        }
        Ok(http_config)
    }
}
