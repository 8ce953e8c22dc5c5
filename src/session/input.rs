//! Input collaborator.
//!
//! The orchestrator asks an [`InputSource`] for one line per prompt. The
//! request says which prompt it is and carries what a front-end needs to
//! render it. Lines go to actions verbatim; case-folding is the action's
//! job. The only line the orchestrator itself interprets is the quit
//! sentinel.

use std::collections::VecDeque;

use crate::board::{Board, Question};
use crate::core::{ActionKind, PlayerId};

/// Reserved input that ends the session at any prompt (case-insensitive).
pub const QUIT_SENTINEL: &str = "QUIT";

/// Check whether a line is the quit sentinel.
#[must_use]
pub fn is_quit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(QUIT_SENTINEL)
}

/// What the orchestrator is asking for.
#[derive(Clone, Copy, Debug)]
pub enum InputRequest<'a> {
    /// A category name or prefix.
    Category { player: &'a PlayerId, board: &'a Board },

    /// A point value within `category`.
    Value { player: &'a PlayerId, category: &'a str },

    /// An answer key for `question`.
    Answer { player: &'a PlayerId, question: &'a Question },
}

impl InputRequest<'_> {
    /// Player being prompted.
    #[must_use]
    pub fn player(&self) -> &PlayerId {
        match self {
            InputRequest::Category { player, .. }
            | InputRequest::Value { player, .. }
            | InputRequest::Answer { player, .. } => player,
        }
    }

    /// Action the line will be fed to.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            InputRequest::Category { .. } => ActionKind::SelectCategory,
            InputRequest::Value { .. } => ActionKind::SelectQuestion,
            InputRequest::Answer { .. } => ActionKind::AnswerQuestion,
        }
    }
}

/// Supplies one line of text per prompt.
///
/// Returning `None` (end of input) is treated the same as the quit
/// sentinel.
pub trait InputSource {
    fn next_line(&mut self, request: &InputRequest<'_>) -> Option<String>;
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn next_line(&mut self, request: &InputRequest<'_>) -> Option<String> {
        (**self).next_line(request)
    }
}

/// Input from a fixed script of lines, for tests and replays.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,

    /// Every request kind served, in order.
    served: Vec<(PlayerId, ActionKind)>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            served: Vec::new(),
        }
    }

    /// Lines not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    /// Prompts answered so far, as (player, action) pairs.
    #[must_use]
    pub fn served(&self) -> &[(PlayerId, ActionKind)] {
        &self.served
    }
}

impl InputSource for ScriptedInput {
    fn next_line(&mut self, request: &InputRequest<'_>) -> Option<String> {
        let line = self.lines.pop_front()?;
        self.served.push((request.player().clone(), request.kind()));
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_sentinel_any_case() {
        assert!(is_quit("QUIT"));
        assert!(is_quit("quit"));
        assert!(is_quit("  Quit "));
        assert!(!is_quit("QUITE"));
        assert!(!is_quit("Q"));
    }

    #[test]
    fn test_scripted_input_serves_in_order() {
        let alice = PlayerId::new("Alice");
        let mut input = ScriptedInput::new(["ARR", "100"]);
        let request = InputRequest::Value { player: &alice, category: "Arrays" };

        assert_eq!(input.next_line(&request).as_deref(), Some("ARR"));
        assert_eq!(input.next_line(&request).as_deref(), Some("100"));
        assert_eq!(input.next_line(&request), None);
        assert_eq!(input.served(), [(alice.clone(), ActionKind::SelectQuestion), (alice, ActionKind::SelectQuestion)]);
    }

    #[test]
    fn test_request_kinds() {
        let bob = PlayerId::new("Bob");
        let board = Board::new();
        let request = InputRequest::Category { player: &bob, board: &board };
        assert_eq!(request.kind(), ActionKind::SelectCategory);
        assert_eq!(request.player(), &bob);
    }
}
