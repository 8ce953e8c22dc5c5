//! Player identification and per-player turn state.
//!
//! ## PlayerId
//!
//! Name-based player identifier, unique within a session.
//!
//! ## Player
//!
//! One `Player` persists for the whole session. Only the score and the
//! current [`Phase`] ever change.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::action::{Action, ActionResult};
use super::context::SessionContext;
use crate::board::Board;
use crate::rules::Phase;

/// Player identifier (the player's display name).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    const SYSTEM: &'static str = "System";

    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The pseudo-player that session-level events are attributed to.
    #[must_use]
    pub fn system() -> Self {
        Self(Self::SYSTEM.to_string())
    }

    /// Get the raw name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A contestant: identity, running score and current turn phase.
///
/// Score is unbounded in both directions; a wrong answer can take it
/// below zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    score: i64,
    phase: Phase,
}

impl Player {
    /// Create a player with a zero score, waiting for their turn.
    #[must_use]
    pub fn new(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            score: 0,
            phase: Phase::Waiting,
        }
    }

    #[must_use]
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Force the player into a phase.
    ///
    /// Only the orchestrator and the scheduler call this; ordinary
    /// progression goes through [`Player::attempt`].
    pub fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!(player = %self.id, from = %self.phase, to = %phase, "forced phase change");
        }
        self.phase = phase;
    }

    /// Add `value` points, saturating at `i64::MAX`.
    pub fn award(&mut self, value: i64) {
        self.score = self.score.saturating_add(value);
    }

    /// Subtract `value` points. No clamping at zero, only at `i64::MIN`.
    pub fn deduct(&mut self, value: i64) {
        self.score = self.score.saturating_sub(value);
    }

    /// Apply the fixed add/subtract scoring rule and return the new score.
    pub fn settle(&mut self, correct: bool, value: i64) -> i64 {
        if correct {
            self.award(value);
        } else {
            self.deduct(value);
        }
        self.score
    }

    /// Run an action if the current phase allows it, then move to the
    /// phase the result dictates.
    ///
    /// An action the phase does not permit is not executed and the phase
    /// is left alone.
    pub fn attempt(
        &mut self,
        action: &dyn Action,
        board: &mut Board,
        context: &mut SessionContext,
        input: Option<&str>,
    ) -> ActionResult {
        let kind = action.kind();
        if !self.phase.permits(kind) {
            debug!(player = %self.id, phase = %self.phase, action = %kind, "action not permitted");
            return ActionResult::failure(format!(
                "{} cannot {} while {}",
                self.id, kind, self.phase
            ));
        }

        let result = action.execute(board, context, input);
        let next = self.phase.next(&result);
        debug!(
            player = %self.id,
            action = %kind,
            success = result.is_success(),
            from = %self.phase,
            to = %next,
            "action executed"
        );
        self.phase = next;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{AnswerQuestionAction, SelectCategoryAction};
    use crate::board::Question;

    fn board() -> Board {
        let mut board = Board::new();
        board.add_question(Question::new(
            "Arrays",
            100,
            "Index of the first element?",
            [("A", "0"), ("B", "1")],
            "A",
        ));
        board.rebuild_index().unwrap();
        board
    }

    #[test]
    fn test_player_id_basics() {
        let id = PlayerId::new("Alice");
        assert_eq!(id.as_str(), "Alice");
        assert_eq!(format!("{}", id), "Alice");
        assert_eq!(PlayerId::from("Alice"), id);
        assert_eq!(PlayerId::system().as_str(), "System");
    }

    #[test]
    fn test_new_player_is_waiting() {
        let player = Player::new("Alice");
        assert_eq!(player.score(), 0);
        assert_eq!(player.phase(), Phase::Waiting);
    }

    #[test]
    fn test_settle_goes_negative() {
        let mut player = Player::new("Bob");
        assert_eq!(player.settle(false, 200), -200);
        assert_eq!(player.settle(true, 100), -100);
        assert_eq!(player.settle(true, 300), 200);
    }

    #[test]
    fn test_settle_saturates_at_extremes() {
        let mut player = Player::new("Alice");
        assert_eq!(player.settle(true, i64::MAX), i64::MAX);
        assert_eq!(player.settle(true, 1), i64::MAX);

        let mut player = Player::new("Bob");
        assert_eq!(player.settle(false, i64::MAX), -i64::MAX);
        assert_eq!(player.settle(false, i64::MAX), i64::MIN);
    }

    #[test]
    fn test_attempt_rejected_when_phase_forbids() {
        let mut board = board();
        let mut context = SessionContext::new("Game_001");
        let mut player = Player::new("Alice");

        let result = player.attempt(&SelectCategoryAction, &mut board, &mut context, Some("arr"));

        assert!(!result.is_success());
        assert_eq!(player.phase(), Phase::Waiting);
        assert_eq!(context.selected_category(), None);
    }

    #[test]
    fn test_attempt_advances_phase_on_success() {
        let mut board = board();
        let mut context = SessionContext::new("Game_001");
        let mut player = Player::new("Alice");
        player.enter(Phase::SelectingCategory);

        let result = player.attempt(&SelectCategoryAction, &mut board, &mut context, Some("arr"));

        assert!(result.is_success());
        assert_eq!(player.phase(), Phase::SelectingQuestion);
        assert_eq!(context.selected_category(), Some("Arrays"));
    }

    #[test]
    fn test_failed_answer_still_ends_phase() {
        let mut board = board();
        let mut context = SessionContext::new("Game_001");
        let (id, _) = board.find_by_category_and_value("Arrays", 100).unwrap();
        context.select_question(id);

        let mut player = Player::new("Alice");
        player.enter(Phase::AnsweringQuestion);
        let result = player.attempt(&AnswerQuestionAction, &mut board, &mut context, Some("B"));

        assert!(!result.is_success());
        assert_eq!(player.phase(), Phase::Waiting);
    }
}
