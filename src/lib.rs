//! # trivia-engine
//!
//! A turn-driven rules engine for a Jeopardy-style multiple-choice quiz.
//!
//! ## Design Principles
//!
//! 1. **Player mistakes are data**: a bad category, an unknown value or a
//!    wrong answer comes back as a failed [`ActionResult`] and the player is
//!    re-prompted. Rust errors are reserved for setup problems.
//!
//! 2. **Phase-gated actions**: each player carries a [`Phase`](rules::Phase)
//!    that permits exactly one action kind. Phases move only on action
//!    results or explicit orchestrator transitions.
//!
//! 3. **Collaborators at the seams**: input and output are traits
//!    ([`InputSource`], [`EventSink`]), so the same turn loop runs behind a
//!    terminal, a script, or a test harness.
//!
//! ## Modules
//!
//! - `core`: players, actions, session context, events, configuration
//! - `board`: questions and the category/value index
//! - `actions`: the three player actions
//! - `rules`: the per-player phase machine
//! - `turns`: round-robin scheduling and the second-chance cycle
//! - `session`: the orchestrator and its collaborator traits
//! - `io`: question loaders, reports, console front-end
//! - `logging`: tracing subscriber setup for the binary

pub mod core;
pub mod board;
pub mod actions;
pub mod rules;
pub mod turns;
pub mod session;
pub mod io;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionResult,
    EventKind, GameEvent, GameConfig,
    Player, PlayerId, SessionContext,
};

pub use crate::board::{AnswerOption, Board, BoardIndex, Question, QuestionId};

pub use crate::actions::{AnswerQuestionAction, SelectCategoryAction, SelectQuestionAction};

pub use crate::rules::Phase;

pub use crate::turns::{SecondChance, Standing, TurnScheduler};

pub use crate::session::{
    EventSink, InputRequest, InputSource, Orchestrator,
    ScriptedInput, SessionOutcome, SessionSummary, TracingSink,
};

pub use crate::io::load_board;

pub use crate::error::{BoardError, LoadError, ReportError, SessionError};
