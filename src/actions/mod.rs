//! The three player actions.
//!
//! Each is a unit struct implementing [`Action`](crate::core::Action). They
//! validate input against the board and session context and report back
//! through an [`ActionResult`](crate::core::ActionResult); they never fail
//! with a Rust error.

mod select_category;
mod select_question;
mod answer_question;

pub use select_category::SelectCategoryAction;
pub use select_question::SelectQuestionAction;
pub use answer_question::AnswerQuestionAction;

const NULL_INPUT: &str = "Input cannot be null";
const NO_QUESTIONS: &str = "No questions available";
