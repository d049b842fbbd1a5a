//! Application layer for llm-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, CouncilConfig, Severity};
pub use ports::{
    progress::{NoProgress, ProgressNotifier},
    provider::{Provider, ProviderError},
    transcript::{NoTranscript, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::run_council::{CouncilMember, NO_PROVIDERS_AVAILABLE, RunCouncilUseCase};
