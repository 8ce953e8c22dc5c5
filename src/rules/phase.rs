//! Player phase state machine.
//!
//! ```text
//! SelectingCategory --ok--> SelectingQuestion --ok--> AnsweringQuestion --any--> Waiting
//!        ^   |fail                ^   |fail
//!        +---+                    +---+
//! ```
//!
//! Each phase whitelists exactly one [`ActionKind`]; `Waiting` permits none.
//! Only the orchestrator moves a player out of `Waiting`.

use serde::{Deserialize, Serialize};

use crate::core::{ActionKind, ActionResult};

/// A player's position within their turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Waiting,
    SelectingCategory,
    SelectingQuestion,
    AnsweringQuestion,
}

impl Phase {
    /// The one action this phase allows, if any.
    #[must_use]
    pub const fn permitted_action(self) -> Option<ActionKind> {
        match self {
            Phase::Waiting => None,
            Phase::SelectingCategory => Some(ActionKind::SelectCategory),
            Phase::SelectingQuestion => Some(ActionKind::SelectQuestion),
            Phase::AnsweringQuestion => Some(ActionKind::AnswerQuestion),
        }
    }

    /// Check whether `kind` is legal in this phase.
    #[must_use]
    pub fn permits(self, kind: ActionKind) -> bool {
        self.permitted_action() == Some(kind)
    }

    /// Transition after an action result.
    ///
    /// Selection phases advance on success and stay put on failure so the
    /// player can retry. Answering always ends in `Waiting`.
    #[must_use]
    pub fn next(self, result: &ActionResult) -> Phase {
        match self {
            Phase::Waiting => Phase::Waiting,
            Phase::SelectingCategory if result.is_success() => Phase::SelectingQuestion,
            Phase::SelectingCategory => Phase::SelectingCategory,
            Phase::SelectingQuestion if result.is_success() => Phase::AnsweringQuestion,
            Phase::SelectingQuestion => Phase::SelectingQuestion,
            Phase::AnsweringQuestion => Phase::Waiting,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Phase::Waiting => "waiting",
            Phase::SelectingCategory => "selecting a category",
            Phase::SelectingQuestion => "selecting a question",
            Phase::AnsweringQuestion => "answering a question",
        };
        f.write_str(text)
    }
}
