//! Trivia questions.
//!
//! A [`Question`] is immutable apart from its `answered` flag, which flips
//! from false to true exactly once, on the first correct answer, and never
//! resets.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Position of a question in its [`Board`](super::Board).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub u32);

impl QuestionId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Question({})", self.0)
    }
}

/// One multiple-choice option: a short key (`A`, `B`, ...) and its text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub key: String,
    pub text: String,
}

/// A single trivia item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    category: String,
    value: i64,
    prompt: String,

    /// Options sorted by key. Most questions have exactly four.
    options: SmallVec<[AnswerOption; 4]>,

    correct_key: String,
    answered: bool,
}

impl Question {
    /// Create an unanswered question.
    ///
    /// ```
    /// use trivia_engine::board::Question;
    ///
    /// let q = Question::new("Arrays", 100, "First index?", [("B", "1"), ("A", "0")], "A");
    /// assert_eq!(q.options()[0].key, "A");
    /// assert!(q.is_correct("a"));
    /// assert!(!q.is_answered());
    /// ```
    pub fn new<K, V>(
        category: impl Into<String>,
        value: i64,
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = (K, V)>,
        correct_key: impl Into<String>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut options: SmallVec<[AnswerOption; 4]> = options
            .into_iter()
            .map(|(key, text)| AnswerOption {
                key: key.into(),
                text: text.into(),
            })
            .collect();
        options.sort_by(|a, b| a.key.cmp(&b.key));

        Self {
            category: category.into(),
            value,
            prompt: prompt.into(),
            options,
            correct_key: correct_key.into(),
            answered: false,
        }
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_key(&self) -> &str {
        &self.correct_key
    }

    /// Text of the option with this key (case-insensitive).
    #[must_use]
    pub fn option_text(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| super::eq_folded(&option.key, key))
            .map(|option| option.text.as_str())
    }

    /// Case-insensitive exact comparison against the correct key.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        super::eq_folded(answer, &self.correct_key)
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    /// Close the question. Returns false if it was already closed.
    pub fn mark_answered(&mut self) -> bool {
        let flipped = !self.answered;
        self.answered = true;
        flipped
    }
}
