//! Questions and the board that owns them.
//!
//! - `question`: a single trivia item and its answered flag
//! - `index`: derived category/value lookup structures
//! - `catalog`: the `Board` itself

pub mod question;
pub mod index;
pub mod catalog;

pub use question::{AnswerOption, Question, QuestionId};
pub use index::BoardIndex;
pub use catalog::Board;

/// Case-fold a string for category and key comparisons.
pub(crate) fn fold(s: &str) -> String {
    s.to_uppercase()
}

/// Case-insensitive equality.
pub(crate) fn eq_folded(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}
