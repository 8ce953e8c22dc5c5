//! Question selection by point value within the selected category.

use tracing::debug;

use crate::board::Board;
use crate::core::{Action, ActionKind, ActionResult, SessionContext};

/// Select the unanswered question worth the given value in the category
/// chosen earlier this turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectQuestionAction;

impl Action for SelectQuestionAction {
    fn kind(&self) -> ActionKind {
        ActionKind::SelectQuestion
    }

    fn validate_preconditions(&self, board: &Board, context: &SessionContext) -> bool {
        !board.is_empty() && context.selected_category().is_some()
    }

    fn execute(
        &self,
        board: &mut Board,
        context: &mut SessionContext,
        input: Option<&str>,
    ) -> ActionResult {
        let Some(input) = input else {
            return ActionResult::failure(super::NULL_INPUT);
        };
        if board.is_empty() {
            return ActionResult::failure(super::NO_QUESTIONS);
        }
        let Some(category) = context.selected_category() else {
            return ActionResult::failure("No category selected");
        };
        let Ok(value) = input.trim().parse::<i64>() else {
            return ActionResult::failure("Invalid value entered.");
        };

        let found = board
            .questions_in_category(category)
            .find(|(_, q)| q.value() == value)
            .map(|(id, q)| (id, q.is_answered()));

        match found {
            Some((_, true)) => {
                ActionResult::failure("Question already answered. Please select another question.")
            }
            Some((id, false)) => {
                debug!(%id, value, "question selected");
                context.select_question(id);
                ActionResult::success(format!("Value selected: {}", value))
            }
            None => ActionResult::failure("Invalid value for selected category. Please try again."),
        }
    }
}
