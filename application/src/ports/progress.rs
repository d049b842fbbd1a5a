//! Progress notification port
//!
//! Defines the interface for reporting progress during a council query.

/// Callback for progress updates during a council query
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, etc.)
/// Callbacks are informational and never affect the result.
pub trait ProgressNotifier: Send + Sync {
    /// Called once the usable providers are known
    fn on_fan_out_start(&self, total: usize);

    /// Called when a provider returned a usable answer
    fn on_provider_success(&self, name: &str, latency_ms: f64);

    /// Called when a provider failed, timed out or panicked
    fn on_provider_failure(&self, name: &str, error: &str);

    /// Called after every provider has settled
    fn on_fan_out_complete(&self, succeeded: usize, failed: usize);

    /// Called for an enabled-but-unusable or disabled provider.
    fn on_provider_skipped(&self, _name: &str) {}

    /// Called just before a provider's task is spawned.
    fn on_provider_start(&self, _name: &str) {}

    /// Called before the synthesizer runs.
    fn on_synthesis_start(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_fan_out_start(&self, _total: usize) {}
    fn on_provider_success(&self, _name: &str, _latency_ms: f64) {}
    fn on_provider_failure(&self, _name: &str, _error: &str) {}
    fn on_fan_out_complete(&self, _succeeded: usize, _failed: usize) {}
}
