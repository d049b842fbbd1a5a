//! Structured transcript logging
//!
//! Provides [`JsonlTranscriptLogger`], a JSONL file writer implementing the
//! [`TranscriptLogger`](council_application::TranscriptLogger) port.

mod transcript;

pub use transcript::JsonlTranscriptLogger;
