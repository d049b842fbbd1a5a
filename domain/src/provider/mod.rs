//! Provider-side data model: who is asked, with what, and what came back.
//!
//! - [`ProviderHandle`] - identity, weight and enabled flag of a provider
//! - [`QueryParams`] - per-call parameters forwarded to every provider
//! - [`QueryOutcome`] - the standardized success/failure record of one call

pub mod handle;
pub mod outcome;
pub mod params;

pub use handle::{DEFAULT_WEIGHT, ProviderHandle};
pub use outcome::{DEFAULT_CONFIDENCE, QueryOutcome, TIMEOUT_MESSAGE};
pub use params::QueryParams;
