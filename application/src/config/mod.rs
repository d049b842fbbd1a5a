//! Application-level configuration.
//!
//! - [`CouncilConfig`] - synthesis thresholds, query parameters and timeouts
//! - [`ConfigIssue`] - structured validation findings

pub mod council_config;

pub use council_config::{
    ConfigIssue, ConfigIssueCode, CouncilConfig, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT, Severity,
};
