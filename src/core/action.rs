//! Player actions: kind tags, results, and the capability trait.
//!
//! Every action a player can take is one of three kinds. Legality is
//! decided by comparing an [`ActionKind`] against the player's
//! [`Phase`](crate::rules::Phase); no runtime type inspection is involved.
//!
//! Actions read and write the [`Board`] and the [`SessionContext`] only.
//! They never touch a player's score or phase; the orchestrator applies
//! scoring afterwards from the [`ActionResult`].

use serde::{Deserialize, Serialize};

use super::context::SessionContext;
use crate::actions::{AnswerQuestionAction, SelectCategoryAction, SelectQuestionAction};
use crate::board::Board;

/// The three things a player can do during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    SelectCategory,
    SelectQuestion,
    AnswerQuestion,
}

impl ActionKind {
    /// All action kinds, in turn order.
    pub const ALL: [ActionKind; 3] = [
        ActionKind::SelectCategory,
        ActionKind::SelectQuestion,
        ActionKind::AnswerQuestion,
    ];

    /// Human-readable label, as used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ActionKind::SelectCategory => "Select Category",
            ActionKind::SelectQuestion => "Select Question",
            ActionKind::AnswerQuestion => "Answer Question",
        }
    }

    /// The action implementation for this kind.
    #[must_use]
    pub fn action(self) -> &'static dyn Action {
        match self {
            ActionKind::SelectCategory => &SelectCategoryAction,
            ActionKind::SelectQuestion => &SelectQuestionAction,
            ActionKind::AnswerQuestion => &AnswerQuestionAction,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            ActionKind::SelectCategory => "select a category",
            ActionKind::SelectQuestion => "select a question",
            ActionKind::AnswerQuestion => "answer a question",
        };
        f.write_str(verb)
    }
}

/// Outcome of executing an action: pass/fail plus a message for the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    success: bool,
    message: String,
}

impl ActionResult {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ActionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Capability set shared by every action.
///
/// `input` is `None` when the input collaborator supplied nothing; every
/// action treats that as a failure without inspecting the board.
pub trait Action {
    /// The kind tag used for legality checks.
    fn kind(&self) -> ActionKind;

    /// Check the structural preconditions (board loaded, category or
    /// question already selected).
    fn validate_preconditions(&self, board: &Board, context: &SessionContext) -> bool;

    /// Execute against the board and session context.
    fn execute(
        &self,
        board: &mut Board,
        context: &mut SessionContext,
        input: Option<&str>,
    ) -> ActionResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_result_constructors() {
        let ok = ActionResult::success("Correct!");
        assert!(ok.is_success());
        assert_eq!(ok.message(), "Correct!");

        let err = ActionResult::failure("Incorrect.");
        assert!(!err.is_success());
        assert_eq!(format!("{}", err), "Incorrect.");
    }

    #[test]
    fn test_kind_dispatch_round_trips() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.action().kind(), kind);
        }
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ActionKind::SelectCategory.label(), "Select Category");
        assert_eq!(ActionKind::AnswerQuestion.to_string(), "answer a question");
    }
}
