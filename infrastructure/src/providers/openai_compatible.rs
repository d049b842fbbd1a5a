//! OpenAI-compatible chat completions adapter (OpenAI, OpenRouter, local servers)

use super::http::{self, HttpProviderConfig};
use async_trait::async_trait;
use council_application::{Provider, ProviderError};
use council_domain::{QueryOutcome, QueryParams};
use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-4-turbo";
pub const DEFAULT_CONFIDENCE: f64 = 0.88;

/// Key variables in lookup order; OpenRouter first
pub const API_KEY_VARS: &[&str] = &["OPENROUTER_API_KEY", "OPENAI_API_KEY"];

/// Variable whose key targets the OpenAI API directly
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";

/// Adjust a vendor-prefixed model id for the endpoint it is sent to.
///
/// OpenRouter takes `vendor/model`; the OpenAI API only serves its own
/// models and takes the bare name.
pub fn normalize_model_id(model: &str, base_url: &str) -> Result<String, String> {
    if !base_url.contains("api.openai.com") {
        return Ok(model.to_string());
    }
    match model.split_once('/') {
        None => Ok(model.to_string()),
        Some(("openai", bare)) => Ok(bare.to_string()),
        Some(_) => Err(format!(
            "model '{}' is not served by the OpenAI API; set OPENROUTER_API_KEY or a base_url",
            model
        )),
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(flatten)]
    extra: &'a std::collections::BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: Option<u64>,
}

/// Provider speaking the `/chat/completions` protocol
pub struct OpenAiCompatibleProvider {
    config: HttpProviderConfig,
    client: reqwest::Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderError> {
        let client = http::build_client(config.timeout, HeaderMap::new())?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpProviderConfig {
        &self.config
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl Provider for OpenAiCompatibleProvider {
    fn is_usable(&self) -> bool {
        self.config.credentials.is_present()
    }

    async fn query(
        &self,
        prompt: &str,
        params: &QueryParams,
    ) -> Result<QueryOutcome, ProviderError> {
        let key = self.config.require_key()?;
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            extra: &params.extra,
        };

        debug!("{}: POST {}", self.config.name, self.chat_url());
        let start = Instant::now();
        let response = self
            .client
            .post(self.chat_url())
            .header(AUTHORIZATION, http::header_value(&format!("Bearer {key}"))?)
            .json(&body)
            .send()
            .await
            .map_err(http::map_transport_error)?;

        let parsed: ChatResponse = http::read_json(response).await?;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("no choices in response".to_string()))?;

        let mut outcome = QueryOutcome::success(&self.config.name, content)
            .with_confidence(self.config.confidence)
            .with_latency_ms(latency_ms);
        if let Some(tokens) = parsed.usage.and_then(|u| u.total_tokens) {
            outcome = outcome.with_token_count(tokens);
        }
        Ok(outcome)
    }
}
