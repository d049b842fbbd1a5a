//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP providers, configuration file loading
//! and the JSONL transcript writer.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig, FileProviderConfig};
pub use logging::JsonlTranscriptLogger;
pub use providers::{
    AnthropicProvider, Credentials, GeminiProvider, HttpProviderConfig,
    OpenAiCompatibleProvider, ProviderFactory,
};
