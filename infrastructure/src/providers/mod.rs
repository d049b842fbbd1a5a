//! HTTP provider adapters
//!
//! Each adapter implements the application's [`Provider`] port for one API
//! family. [`ProviderFactory`] builds them from configuration.
//!
//! [`Provider`]: council_application::Provider

pub mod anthropic;
pub mod credentials;
pub mod factory;
pub mod gemini;
pub mod http;
pub mod openai_compatible;

pub use anthropic::AnthropicProvider;
pub use credentials::Credentials;
pub use factory::ProviderFactory;
pub use gemini::GeminiProvider;
pub use http::HttpProviderConfig;
pub use openai_compatible::OpenAiCompatibleProvider;
