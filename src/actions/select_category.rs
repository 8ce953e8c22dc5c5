//! Category selection by case-insensitive prefix.

use tracing::debug;

use crate::board::{fold, Board};
use crate::core::{Action, ActionKind, ActionResult, SessionContext};

/// Select the first category (in board order) whose name starts with the
/// input, ignoring case.
///
/// ```
/// use trivia_engine::actions::SelectCategoryAction;
/// use trivia_engine::board::{Board, Question};
/// use trivia_engine::core::{Action, SessionContext};
///
/// let mut board = Board::new();
/// board.add_question(Question::new("Variables & Data Types", 100, "?", [("A", "a")], "A"));
/// board.rebuild_index().unwrap();
/// let mut context = SessionContext::new("Game_001");
///
/// let result = SelectCategoryAction.execute(&mut board, &mut context, Some("var"));
/// assert!(result.is_success());
/// assert_eq!(context.selected_category(), Some("Variables & Data Types"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectCategoryAction;

impl Action for SelectCategoryAction {
    fn kind(&self) -> ActionKind {
        ActionKind::SelectCategory
    }

    fn validate_preconditions(&self, board: &Board, _context: &SessionContext) -> bool {
        !board.is_empty()
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
        if input.trim().is_empty() {
            return ActionResult::failure("Category cannot be empty");
        }
        if !self.validate_preconditions(board, context) {
            return ActionResult::failure(super::NO_QUESTIONS);
        }

        let wanted = fold(input);
        let matched = board
            .iter()
            .map(|(_, q)| q.category())
            .find(|category| fold(category).starts_with(&wanted));

        match matched {
            Some(category) => {
                debug!(input, category, "category matched");
                context.select_category(category);
                ActionResult::success(format!("Category selected: {}", category.to_lowercase()))
            }
            None => ActionResult::failure("Invalid category selection. Please try again."),
        }
    }
}
