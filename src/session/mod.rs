//! Session orchestration and its collaborator seams.
//!
//! - `input`: the [`InputSource`] trait, prompts, and the quit sentinel
//! - `sink`: the [`EventSink`] trait and stock sinks
//! - `orchestrator`: the turn loop

pub mod input;
pub mod sink;
pub mod orchestrator;

pub use input::{is_quit, InputRequest, InputSource, ScriptedInput, QUIT_SENTINEL};
pub use sink::{EventSink, TracingSink};
pub use orchestrator::{Orchestrator, SessionOutcome, SessionSummary};
