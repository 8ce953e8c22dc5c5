//! The question board.
//!
//! The `Board` owns every loaded [`Question`] and is the single source of
//! truth for which questions are still open. Category/value addressing goes
//! through a derived [`BoardIndex`] that must be rebuilt after questions are
//! added.

use tracing::debug;

use super::index::BoardIndex;
use super::question::{Question, QuestionId};
use crate::error::BoardError;

/// Catalog of questions plus derived indexes.
///
/// ## Example
///
/// ```
/// use trivia_engine::board::{Board, Question};
///
/// let mut board = Board::new();
/// board.add_question(Question::new("Arrays", 100, "First index?", [("A", "0"), ("B", "1")], "A"));
/// board.add_question(Question::new("Arrays", 200, "Length of []?", [("A", "1"), ("B", "0")], "B"));
/// board.rebuild_index().unwrap();
///
/// let (_, q) = board.find_by_category_and_value("arrays", 200).unwrap();
/// assert_eq!(q.correct_key(), "B");
/// assert!(board.has_open_questions());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Board {
    questions: Vec<Question>,

    /// `None` until `rebuild_index` runs, and again after any `add_question`.
    index: Option<BoardIndex>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a question. Invalidates the index.
    pub fn add_question(&mut self, question: Question) -> QuestionId {
        let id = QuestionId::new(self.questions.len() as u32);
        self.questions.push(question);
        self.index = None;
        id
    }

    /// Rebuild the category/value indexes from scratch.
    ///
    /// Safe to call again at any time; it re-scans every question.
    pub fn rebuild_index(&mut self) -> Result<(), BoardError> {
        let index = BoardIndex::build(&self.questions)?;
        debug!(
            questions = self.questions.len(),
            categories = index.categories().len(),
            values = index.values().len(),
            "board index rebuilt"
        );
        self.index = Some(index);
        Ok(())
    }

    #[must_use]
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// The derived indexes, if built.
    #[must_use]
    pub fn index(&self) -> Option<&BoardIndex> {
        self.index.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.get(id.index())
    }

    pub fn question_mut(&mut self, id: QuestionId) -> Option<&mut Question> {
        self.questions.get_mut(id.index())
    }

    /// All questions in load order.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &Question)> {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| (QuestionId::new(i as u32), q))
    }

    /// Questions whose category equals `category`, ignoring case, in load
    /// order. Empty if nothing matches.
    pub fn questions_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = (QuestionId, &'a Question)> + 'a {
        self.iter()
            .filter(move |(_, q)| super::eq_folded(q.category(), category))
    }

    /// Look up the question at a category/value cell.
    #[must_use]
    pub fn find_by_category_and_value(&self, category: &str, value: i64) -> Option<(QuestionId, &Question)> {
        match &self.index {
            Some(index) => {
                let id = index.cell(category, value)?;
                self.question(id).map(|q| (id, q))
            }
            None => self
                .iter()
                .find(|(_, q)| q.value() == value && super::eq_folded(q.category(), category)),
        }
    }

    /// True iff at least one question is still unanswered.
    #[must_use]
    pub fn has_open_questions(&self) -> bool {
        self.questions.iter().any(|q| !q.is_answered())
    }

    /// True iff `category` still has an unanswered question.
    #[must_use]
    pub fn has_open_questions_in(&self, category: &str) -> bool {
        self.questions_in_category(category)
            .any(|(_, q)| !q.is_answered())
    }

    /// Number of unanswered questions.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.questions.iter().filter(|q| !q.is_answered()).count()
    }
}

impl FromIterator<Question> for Board {
    fn from_iter<T: IntoIterator<Item = Question>>(iter: T) -> Self {
        Self {
            questions: iter.into_iter().collect(),
            index: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        let options = [("A", "ans1"), ("B", "ans2"), ("C", "ans3"), ("D", "ans4")];
        let mut board: Board = [
            Question::new("Variables", 100, "Q1", options, "A"),
            Question::new("Variables", 200, "Q2", options, "B"),
            Question::new("Functions", 300, "Q3", options, "C"),
            Question::new("Arrays", 400, "Q4", options, "D"),
        ]
        .into_iter()
        .collect();
        board.rebuild_index().unwrap();
        board
    }

    #[test]
    fn test_questions_in_category_ignores_case() {
        let board = board();
        let prompts: Vec<_> = board
            .questions_in_category("VARIABLES")
            .map(|(_, q)| q.prompt())
            .collect();
        assert_eq!(prompts, ["Q1", "Q2"]);
        assert_eq!(board.questions_in_category("Var").count(), 0);
        assert_eq!(board.questions_in_category("Nope").count(), 0);
    }

    #[test]
    fn test_find_by_category_and_value() {
        let board = board();
        let (id, q) = board.find_by_category_and_value("functions", 300).unwrap();
        assert_eq!(id, QuestionId::new(2));
        assert_eq!(q.prompt(), "Q3");
        assert!(board.find_by_category_and_value("Functions", 100).is_none());
    }

    #[test]
    fn test_find_without_index_scans() {
        let mut board = board();
        board.add_question(Question::new("Loops", 500, "Q5", [("A", "x")], "A"));
        assert!(!board.is_indexed());

        let (id, _) = board.find_by_category_and_value("Loops", 500).unwrap();
        assert_eq!(id, QuestionId::new(4));
    }

    #[test]
    fn test_has_open_questions_tracks_answered() {
        let mut board = board();
        assert!(board.has_open_questions());
        assert_eq!(board.open_count(), 4);

        for i in 0..4 {
            board.question_mut(QuestionId::new(i)).unwrap().mark_answered();
        }

        assert!(!board.has_open_questions());
        assert!(!board.has_open_questions_in("Arrays"));
        assert_eq!(board.open_count(), 0);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut board = board();
        board.question_mut(QuestionId::new(0)).unwrap().mark_answered();

        board.rebuild_index().unwrap();
        let first: Vec<String> = board.index().unwrap().categories().to_vec();
        board.rebuild_index().unwrap();

        assert_eq!(board.index().unwrap().categories(), first.as_slice());
        assert_eq!(board.index().unwrap().values(), [400, 300, 200, 100]);
        assert!(board.question(QuestionId::new(0)).unwrap().is_answered());
    }

    #[test]
    fn test_add_question_invalidates_index() {
        let mut board = board();
        assert!(board.is_indexed());
        board.add_question(Question::new("Loops", 100, "Q", [("A", "a")], "A"));
        assert!(!board.is_indexed());
        assert_eq!(board.len(), 5);
    }

    #[test]
    fn test_empty_board() {
        let mut board = Board::new();
        assert!(board.is_empty());
        assert!(!board.has_open_questions());
        board.rebuild_index().unwrap();
        assert!(board.index().unwrap().categories().is_empty());
    }
}
