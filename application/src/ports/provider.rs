//! Provider port
//!
//! Defines the interface every answer source implements.

use async_trait::async_trait;
use council_domain::{QueryOutcome, QueryParams};
use thiserror::Error;

/// Errors a provider can report for a single call
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// An answer source queried by the council
///
/// Implementations (adapters) live in the infrastructure layer. Credentials
/// and HTTP clients are handed to an adapter when it is built; `query` never
/// reads process-wide state.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Cheap local check: credentials present, client configured.
    fn is_usable(&self) -> bool;

    /// Send one prompt. A single attempt; the caller applies the time limit.
    async fn query(&self, prompt: &str, params: &QueryParams)
    -> Result<QueryOutcome, ProviderError>;
}
