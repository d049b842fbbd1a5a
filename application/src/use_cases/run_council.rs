//! Run Council use case
//!
//! Fans a prompt out to every usable provider, collects one outcome per
//! provider and hands them to the consensus synthesizer.

use crate::config::DEFAULT_TIMEOUT;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::provider::Provider;
use crate::ports::transcript::{
    EVENT_PROVIDER_OUTCOME, EVENT_QUERY_STARTED, EVENT_SYNTHESIS_COMPLETE, NoTranscript,
    TranscriptEvent, TranscriptLogger,
};
use council_domain::{
    ConsensusSynthesizer, DomainError, Prompt, ProviderHandle, QueryOutcome, QueryParams,
    SynthesisConfig, SynthesisResult,
};
use futures::FutureExt;
use serde_json::json;
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Answer text when no member can be asked at all
pub const NO_PROVIDERS_AVAILABLE: &str = "No providers available";

const EMPTY_RESPONSE: &str = "Empty response";
const TASK_ABORTED: &str = "task aborted";

/// A provider registered with the council
#[derive(Clone)]
pub struct CouncilMember {
    pub handle: ProviderHandle,
    pub provider: Arc<dyn Provider>,
    /// Per-member time limit; the use case default applies when `None`
    pub timeout: Option<Duration>,
}

impl CouncilMember {
    pub fn new(handle: ProviderHandle, provider: Arc<dyn Provider>) -> Self {
        Self {
            handle,
            provider,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn name(&self) -> &str {
        self.handle.display_name()
    }

    /// Enabled and ready to be queried
    pub fn is_available(&self) -> bool {
        self.handle.is_enabled() && self.provider.is_usable()
    }
}

impl std::fmt::Debug for CouncilMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CouncilMember")
            .field("handle", &self.handle)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Use case for asking the whole council one question
pub struct RunCouncilUseCase {
    members: Vec<CouncilMember>,
    synthesizer: ConsensusSynthesizer,
    default_timeout: Duration,
    transcript: Arc<dyn TranscriptLogger>,
}

impl RunCouncilUseCase {
    /// Build the use case, rejecting bad thresholds and duplicate names.
    pub fn new(
        members: Vec<CouncilMember>,
        synthesis_config: SynthesisConfig,
    ) -> Result<Self, DomainError> {
        let synthesizer = ConsensusSynthesizer::new(synthesis_config)?;

        let mut seen = HashSet::new();
        for member in &members {
            if !seen.insert(member.name()) {
                return Err(DomainError::DuplicateProvider(member.name().to_string()));
            }
        }

        Ok(Self {
            members,
            synthesizer,
            default_timeout: DEFAULT_TIMEOUT,
            transcript: Arc::new(NoTranscript),
        })
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn members(&self) -> &[CouncilMember] {
        &self.members
    }

    pub fn usable_members(&self) -> impl Iterator<Item = &CouncilMember> {
        self.members.iter().filter(|m| m.is_available())
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Weight of every registered member, keyed by display name
    pub fn weights(&self) -> HashMap<String, f64> {
        self.members
            .iter()
            .map(|m| (m.name().to_string(), m.handle.weight()))
            .collect()
    }

    /// Execute the use case with default (no-op) progress
    pub async fn run_query(&self, prompt: &Prompt, params: &QueryParams) -> SynthesisResult {
        self.run_query_with_progress(prompt, params, &NoProgress)
            .await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Never fails: provider errors, timeouts and panics all end up as
    /// failed outcomes inside the returned result.
    pub async fn run_query_with_progress(
        &self,
        prompt: &Prompt,
        params: &QueryParams,
        progress: &dyn ProgressNotifier,
    ) -> SynthesisResult {
        let mut usable = Vec::new();
        for member in &self.members {
            if member.is_available() {
                usable.push(member);
            } else {
                debug!("Skipping provider {} (disabled or unusable)", member.name());
                progress.on_provider_skipped(member.name());
            }
        }

        self.transcript.log(TranscriptEvent::new(
            EVENT_QUERY_STARTED,
            json!({
                "prompt": prompt.content(),
                "providers": usable.iter().map(|m| m.name()).collect::<Vec<_>>(),
            }),
        ));

        if usable.is_empty() {
            warn!("No usable providers, returning without querying");
            let result = SynthesisResult::no_answer(NO_PROVIDERS_AVAILABLE);
            self.log_synthesis(&result);
            return result;
        }

        info!("Querying {} providers", usable.len());
        progress.on_fan_out_start(usable.len());

        let outcomes = self.fan_out(&usable, prompt, params, progress).await;

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        let failed = outcomes.len() - succeeded;
        progress.on_fan_out_complete(succeeded, failed);
        info!("{} providers succeeded, {} failed", succeeded, failed);

        progress.on_synthesis_start();
        let result = self
            .synthesizer
            .synthesize(&outcomes, &self.weights(), prompt.content());

        info!(
            "Consensus: {} ({:.0}%)",
            result.consensus_level,
            result.confidence_score * 100.0
        );
        self.log_synthesis(&result);
        result
    }

    /// Query all usable members in parallel; outcomes come back in member order.
    async fn fan_out(
        &self,
        usable: &[&CouncilMember],
        prompt: &Prompt,
        params: &QueryParams,
        progress: &dyn ProgressNotifier,
    ) -> Vec<QueryOutcome> {
        let mut join_set = JoinSet::new();

        for (slot, member) in usable.iter().enumerate() {
            let provider = Arc::clone(&member.provider);
            let name = member.name().to_string();
            let prompt = prompt.content().to_string();
            let params = params.clone();
            let limit = member.timeout.unwrap_or(self.default_timeout);

            progress.on_provider_start(&name);
            join_set.spawn(async move {
                let outcome = query_member(provider, &name, &prompt, &params, limit).await;
                (slot, outcome)
            });
        }

        let mut slots: Vec<Option<QueryOutcome>> = vec![None; usable.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((slot, outcome)) => {
                    if outcome.is_success() {
                        info!("Provider {} responded successfully", outcome.provider_name);
                        progress.on_provider_success(
                            &outcome.provider_name,
                            outcome.latency_ms.unwrap_or_default(),
                        );
                    } else {
                        let error = outcome.error_message.as_deref().unwrap_or_default();
                        warn!("Provider {} failed: {}", outcome.provider_name, error);
                        progress.on_provider_failure(&outcome.provider_name, error);
                    }
                    self.transcript.log(TranscriptEvent::new(
                        EVENT_PROVIDER_OUTCOME,
                        json!(outcome),
                    ));
                    slots[slot] = Some(outcome);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        slots
            .into_iter()
            .zip(usable)
            .map(|(outcome, member)| {
                outcome.unwrap_or_else(|| {
                    progress.on_provider_failure(member.name(), TASK_ABORTED);
                    QueryOutcome::failure(member.name(), TASK_ABORTED)
                })
            })
            .collect()
    }

    fn log_synthesis(&self, result: &SynthesisResult) {
        self.transcript.log(TranscriptEvent::new(
            EVENT_SYNTHESIS_COMPLETE,
            json!({
                "consensus_level": result.consensus_level,
                "confidence_score": result.confidence_score,
                "agreements": result.agreements.len(),
                "disagreements": result.disagreements.len(),
                "synthesized_answer": result.synthesized_answer,
            }),
        ));
    }
}

/// Run one provider call under its time limit, turning every way it can
/// go wrong into a failed outcome attributed to `name`.
async fn query_member(
    provider: Arc<dyn Provider>,
    name: &str,
    prompt: &str,
    params: &QueryParams,
    limit: Duration,
) -> QueryOutcome {
    let started = Instant::now();
    let call = AssertUnwindSafe(provider.query(prompt, params)).catch_unwind();

    match tokio::time::timeout(limit, call).await {
        Ok(Ok(Ok(mut outcome))) => {
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            outcome.provider_name = name.to_string();
            if outcome.latency_ms.is_none() {
                outcome.latency_ms = Some(elapsed_ms);
            }
            if outcome.content.is_empty() && outcome.error_message.is_none() {
                outcome.error_message = Some(EMPTY_RESPONSE.to_string());
            }
            // Fields are public; a provider may have skipped the clamping builder
            let hint = outcome.confidence_hint;
            outcome.with_confidence(hint)
        }
        Ok(Ok(Err(e))) => QueryOutcome::failure(name, e.to_string())
            .with_latency_ms(started.elapsed().as_secs_f64() * 1000.0),
        Ok(Err(panic)) => {
            QueryOutcome::failure(name, format!("provider panicked: {}", panic_message(panic.as_ref())))
        }
        Err(_) => {
            debug!("Provider {} hit its {:?} time limit", name, limit);
            QueryOutcome::timeout(name)
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
