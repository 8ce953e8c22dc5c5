//! Second-chance sub-cycle.
//!
//! After the selector's attempt on a question, if it is still open, the
//! next players in rotation each get one attempt at the same question. The
//! cycle ends as soon as someone answers correctly or rotation comes back
//! around to the selector, so with N players it runs at most N attempts.

use crate::core::PlayerId;

/// Tracks one question's attempt cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecondChance {
    /// Player who selected the question.
    origin: PlayerId,

    /// Attempts made so far, including the selector's own.
    attempts: usize,
}

impl SecondChance {
    /// Start a cycle for a question selected by `origin`.
    #[must_use]
    pub fn begin(origin: PlayerId) -> Self {
        Self { origin, attempts: 0 }
    }

    #[must_use]
    pub fn origin(&self) -> &PlayerId {
        &self.origin
    }

    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Decide whether `next` (the player now at the front of the queue)
    /// gets an attempt.
    ///
    /// No while the question is answered, when no one is next, or when the
    /// rotation has come back to the selector.
    #[must_use]
    pub fn should_continue(&self, question_answered: bool, next: Option<&PlayerId>) -> bool {
        !question_answered && next.is_some_and(|next| *next != self.origin)
    }
}
