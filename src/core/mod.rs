//! Core engine types: players, actions, session context, events, configuration.
//!
//! These are the building blocks the board, rules, turn scheduler and
//! orchestrator all share.

pub mod player;
pub mod action;
pub mod context;
pub mod event;
pub mod config;

pub use player::{Player, PlayerId};
pub use action::{Action, ActionKind, ActionResult};
pub use context::SessionContext;
pub use event::{EventKind, GameEvent};
pub use config::GameConfig;
