//! Consensus synthesis
//!
//! Lexical heuristics that compare provider responses and fold them into a
//! single [`SynthesisResult`]:
//!
//! - [`statements`] - key statement extraction
//! - [`agreement`] / [`disagreement`] - shared words and opposing keywords
//! - [`scoring`] - weighted confidence
//! - [`meta`] - reasons providers may disagree
//! - [`synthesizer`] - the [`ConsensusSynthesizer`] tying it together

pub mod agreement;
pub mod config;
pub mod disagreement;
pub mod level;
pub mod meta;
pub mod result;
pub mod scoring;
pub mod statements;
pub mod synthesizer;

pub use config::SynthesisConfig;
pub use level::ConsensusLevel;
pub use result::{ProviderView, SynthesisResult};
pub use synthesizer::{ConsensusSynthesizer, NO_VALID_RESPONSES};
