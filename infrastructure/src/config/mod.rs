//! Configuration file loading for llm-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COUNCIL_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. Global config: `$XDG_CONFIG_HOME/llm-council/config.toml`
//! 5. Default values

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    AdapterKind, FileConfig, FileOutputConfig, FileProviderConfig, FileQueryConfig,
    FileSynthesisConfig, default_providers,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
