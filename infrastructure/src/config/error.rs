//! Errors raised while loading configuration or building providers from it

use council_application::ProviderError;
use council_domain::DomainError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("providers.{key}: {message}")]
    UnknownAdapter { key: String, message: String },

    #[error("providers.{key}: {source}")]
    InvalidProvider {
        key: String,
        #[source]
        source: DomainError,
    },

    #[error("providers.{key}: {message}")]
    UnsupportedModel { key: String, message: String },

    #[error("providers.{key}: {source}")]
    Client {
        key: String,
        #[source]
        source: ProviderError,
    },
}
