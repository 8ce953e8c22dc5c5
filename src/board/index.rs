//! Derived lookup structures over a board's questions.

use rustc_hash::FxHashMap;

use super::question::{Question, QuestionId};
use crate::error::BoardError;

/// Read-only indexes derived from the question list.
///
/// - `categories`: unique category names in first-seen order
/// - `values`: unique point values, descending
/// - `grid`: category × value → question
///
/// Category keys are case-folded, so `"Arrays"` and `"ARRAYS"` address the
/// same column; the column keeps the first-seen spelling.
#[derive(Clone, Debug, Default)]
pub struct BoardIndex {
    categories: Vec<String>,
    values: Vec<i64>,
    grid: FxHashMap<String, FxHashMap<i64, QuestionId>>,
}

impl BoardIndex {
    /// Scan every question and build the indexes.
    ///
    /// Fails if two questions land in the same cell.
    pub(crate) fn build(questions: &[Question]) -> Result<Self, BoardError> {
        let mut index = Self::default();

        for (i, question) in questions.iter().enumerate() {
            let id = QuestionId::new(i as u32);
            let key = super::fold(question.category());

            if !index.grid.contains_key(&key) {
                index.categories.push(question.category().to_string());
            }

            let column = index.grid.entry(key).or_default();
            if column.insert(question.value(), id).is_some() {
                return Err(BoardError::DuplicateCell {
                    category: question.category().to_string(),
                    value: question.value(),
                });
            }

            if !index.values.contains(&question.value()) {
                index.values.push(question.value());
            }
        }

        index.values.sort_unstable_by(|a, b| b.cmp(a));
        Ok(index)
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Look up a cell (category matched case-insensitively).
    #[must_use]
    pub fn cell(&self, category: &str, value: i64) -> Option<QuestionId> {
        self.grid
            .get(&super::fold(category))
            .and_then(|column| column.get(&value))
            .copied()
    }
}
