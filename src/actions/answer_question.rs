//! Answer submission.

use tracing::debug;

use crate::board::Board;
use crate::core::{Action, ActionKind, ActionResult, SessionContext};

/// Compare the submitted key with the selected question's correct key
/// (case-insensitive, exact). A correct answer closes the question.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnswerQuestionAction;

impl Action for AnswerQuestionAction {
    fn kind(&self) -> ActionKind {
        ActionKind::AnswerQuestion
    }

    fn validate_preconditions(&self, board: &Board, context: &SessionContext) -> bool {
        context
            .selected_question()
            .is_some_and(|id| board.question(id).is_some())
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
        let Some(question) = context
            .selected_question()
            .and_then(|id| board.question_mut(id))
        else {
            return ActionResult::failure("No question set");
        };

        if question.is_correct(input) {
            question.mark_answered();
            debug!(category = question.category(), value = question.value(), "question answered");
            ActionResult::success("Correct!")
        } else {
            ActionResult::failure("Incorrect.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Question, QuestionId};

    fn setup() -> (Board, SessionContext) {
        let mut board = Board::new();
        board.add_question(Question::new(
            "Arrays",
            100,
            "Q1",
            [("A", "a"), ("B", "b"), ("C", "c"), ("D", "d")],
            "B",
        ));
        board.rebuild_index().unwrap();
        let mut context = SessionContext::new("Game_001");
        context.select_question(QuestionId::new(0));
        (board, context)
    }

    fn answered(board: &Board) -> bool {
        board.question(QuestionId::new(0)).unwrap().is_answered()
    }

    #[test]
    fn test_correct_answer_closes_question() {
        let (mut board, mut context) = setup();
        let result = AnswerQuestionAction.execute(&mut board, &mut context, Some("b"));
        assert!(result.is_success());
        assert_eq!(result.message(), "Correct!");
        assert!(answered(&board));
    }

    #[test]
    fn test_wrong_answer_leaves_question_open() {
        let (mut board, mut context) = setup();
        let result = AnswerQuestionAction.execute(&mut board, &mut context, Some("A"));
        assert!(!result.is_success());
        assert_eq!(result.message(), "Incorrect.");
        assert!(!answered(&board));
    }

    #[test]
    fn test_prefix_of_key_is_wrong() {
        let mut board = Board::new();
        board.add_question(Question::new("X", 100, "Q", [("AB", "x")], "AB"));
        let mut context = SessionContext::new("Game_001");
        context.select_question(QuestionId::new(0));

        assert!(!AnswerQuestionAction.execute(&mut board, &mut context, Some("A")).is_success());
        assert!(AnswerQuestionAction.execute(&mut board, &mut context, Some("ab")).is_success());
    }

    #[test]
    fn test_null_input_skips_comparison() {
        let (mut board, mut context) = setup();
        let result = AnswerQuestionAction.execute(&mut board, &mut context, None);
        assert_eq!(result.message(), "Input cannot be null");
        assert!(!answered(&board));
    }

    #[test]
    fn test_requires_selected_question() {
        let (mut board, mut context) = setup();
        context.clear_selection();
        assert!(!AnswerQuestionAction.validate_preconditions(&board, &context));
        let result = AnswerQuestionAction.execute(&mut board, &mut context, Some("B"));
        assert_eq!(result.message(), "No question set");
    }

    #[test]
    fn test_answered_stays_answered() {
        let (mut board, mut context) = setup();
        AnswerQuestionAction.execute(&mut board, &mut context, Some("B"));
        AnswerQuestionAction.execute(&mut board, &mut context, Some("C"));
        assert!(answered(&board));
    }
}
