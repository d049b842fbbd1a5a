//! Domain layer for llm-council
//!
//! This crate contains the data model and the consensus synthesizer.
//! It has no dependencies on infrastructure or presentation concerns, and
//! nothing in it performs I/O.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council is a set of providers asked the same question:
//!
//! - **Provider**: identified by a [`ProviderHandle`] carrying a weight
//! - **Outcome**: each call yields one [`QueryOutcome`], success or failure
//!
//! ## Consensus
//!
//! The [`ConsensusSynthesizer`] compares successful outcomes lexically and
//! classifies them into a [`ConsensusLevel`]:
//!
//! - **Strong** / **Moderate**: providers largely agree
//! - **Weak** / **Conflicted**: responses differ or contradict each other

pub mod config;
pub mod consensus;
pub mod core;
pub mod provider;

// Re-export commonly used types
pub use config::OutputFormat;
pub use consensus::{
    ConsensusLevel, ConsensusSynthesizer, NO_VALID_RESPONSES, ProviderView, SynthesisConfig,
    SynthesisResult,
};
pub use core::{error::DomainError, prompt::Prompt};
pub use provider::{
    DEFAULT_CONFIDENCE, DEFAULT_WEIGHT, ProviderHandle, QueryOutcome, QueryParams,
    TIMEOUT_MESSAGE,
};
