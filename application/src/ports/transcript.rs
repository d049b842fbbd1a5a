//! Port for structured query transcripts.
//!
//! Defines the [`TranscriptLogger`] trait for recording the events of a
//! council query (prompt, each provider outcome, the synthesis) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! transcript in a machine-readable format (JSONL).

use serde_json::Value;

pub const EVENT_QUERY_STARTED: &str = "query_started";
pub const EVENT_PROVIDER_OUTCOME: &str = "provider_outcome";
pub const EVENT_SYNTHESIS_COMPLETE: &str = "synthesis_complete";

/// A structured transcript event.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Timestamps are added by the logger.
#[derive(Debug, Clone)]
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "query_started", "provider_outcome").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// `log` is synchronous and non-fallible; write failures are dropped so they
/// never disturb a query.
pub trait TranscriptLogger: Send + Sync {
    /// Record a transcript event.
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when transcripts are disabled.
pub struct NoTranscript;

impl TranscriptLogger for NoTranscript {
    fn log(&self, _event: TranscriptEvent) {}
}
