//! Intelligence synthesis for prospect companies.
//!
//! Builds prompts from aggregated signals, calls a generative-text backend,
//! and turns its free-text replies into typed records: one
//! [`CompanyAnalysis`] per company, or one [`BatchEmailResult`] per company
//! for batch outreach emails.
//!
//! [`CompanyAnalysis`]: prospector_core::CompanyAnalysis
//! [`BatchEmailResult`]: prospector_core::BatchEmailResult

pub mod batch;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod parse;
pub mod prompt;

pub use batch::parse_batch_response;
pub use error::{ModelError, ParseError, SynthError};
pub use model::{AnthropicClient, OpenAiClient, TextModel};
pub use orchestrator::{backfill_required, SignalProvider, Synthesizer};
pub use parse::parse_analysis;
pub use prompt::{build_batch_prompt, build_single_prompt, PromptPair};
