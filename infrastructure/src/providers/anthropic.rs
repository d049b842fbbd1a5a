//! Anthropic Messages API adapter

use super::http::{self, HttpProviderConfig};
use async_trait::async_trait;
use council_application::{Provider, ProviderError};
use council_domain::{QueryOutcome, QueryParams};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

pub const BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_CONFIDENCE: f64 = 0.9;
pub const API_KEY_VARS: &[&str] = &["ANTHROPIC_API_KEY"];
pub const API_VERSION: &str = "2023-06-01";

/// The Messages API requires `max_tokens` on every request
const FALLBACK_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(flatten)]
    extra: &'a std::collections::BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

pub struct AnthropicProvider {
    config: HttpProviderConfig,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        let client = http::build_client(config.timeout, headers)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpProviderConfig {
        &self.config
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn is_usable(&self) -> bool {
        self.config.credentials.is_present()
    }

    async fn query(
        &self,
        prompt: &str,
        params: &QueryParams,
    ) -> Result<QueryOutcome, ProviderError> {
        let key = self.config.require_key()?;
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: params.max_tokens.unwrap_or(FALLBACK_MAX_TOKENS),
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            extra: &params.extra,
        };

        debug!("{}: POST {}", self.config.name, self.messages_url());
        let start = Instant::now();
        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", http::header_value(key)?)
            .json(&body)
            .send()
            .await
            .map_err(http::map_transport_error)?;

        let parsed: MessagesResponse = http::read_json(response).await?;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let text: Vec<String> = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();
        if text.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "no text content in response".to_string(),
            ));
        }

        let mut outcome = QueryOutcome::success(&self.config.name, text.join("\n"))
            .with_confidence(self.config.confidence)
            .with_latency_ms(latency_ms);
        if let Some(usage) = parsed.usage {
            outcome = outcome.with_token_count(usage.input_tokens + usage.output_tokens);
        }
        Ok(outcome)
    }
}
