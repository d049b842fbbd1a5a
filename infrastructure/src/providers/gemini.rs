//! Google Gemini generateContent adapter

use super::http::{self, HttpProviderConfig};
use async_trait::async_trait;
use council_application::{Provider, ProviderError};
use council_domain::{QueryOutcome, QueryParams};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

pub const BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_CONFIDENCE: f64 = 0.85;
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "GenerationConfig::is_empty")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.max_output_tokens.is_none() && self.temperature.is_none()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    total_token_count: Option<u64>,
}

pub struct GeminiProvider {
    config: HttpProviderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderError> {
        let client = http::build_client(config.timeout, HeaderMap::new())?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpProviderConfig {
        &self.config
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn is_usable(&self) -> bool {
        self.config.credentials.is_present()
    }

    async fn query(
        &self,
        prompt: &str,
        params: &QueryParams,
    ) -> Result<QueryOutcome, ProviderError> {
        let key = self.config.require_key()?;
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: params.max_tokens,
                temperature: params.temperature,
            },
        };

        // The key travels as a query parameter; keep it out of the log line
        debug!("{}: POST {}", self.config.name, self.generate_url());
        let start = Instant::now();
        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| http::map_transport_error(e.without_url()))?;

        let parsed: GenerateResponse = http::read_json(response).await?;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "no candidate text in response".to_string(),
            ));
        }

        let mut outcome = QueryOutcome::success(&self.config.name, text)
            .with_confidence(self.config.confidence)
            .with_latency_ms(latency_ms);
        if let Some(tokens) = parsed.usage_metadata.and_then(|u| u.total_token_count) {
            outcome = outcome.with_token_count(tokens);
        }
        Ok(outcome)
    }
}
