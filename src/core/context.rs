//! Session context: the shared, per-game state every action can see.
//!
//! Holds the currently selected category and question, the turn counter,
//! the running flag, and the append-only event history. One context is
//! built per game and passed by reference; there is no global instance.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use crate::board::QuestionId;

/// Transient state for one game session.
///
/// History uses an `im` persistent vector so snapshots handed to report
/// writers are O(1) clones.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionContext {
    case_id: String,

    /// Category chosen this turn (exact stored name).
    category: Option<String>,

    /// Question chosen this turn.
    question: Option<QuestionId>,

    /// Turn number (starts at 1).
    turn: u32,

    running: bool,

    history: Vector<GameEvent>,
}

impl SessionContext {
    /// Create a running context at turn 1 with nothing selected.
    #[must_use]
    pub fn new(case_id: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            category: None,
            question: None,
            turn: 1,
            running: true,
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    // === Selection ===

    #[must_use]
    pub fn selected_category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn select_category(&mut self, category: impl Into<String>) {
        self.category = Some(category.into());
    }

    #[must_use]
    pub fn selected_question(&self) -> Option<QuestionId> {
        self.question
    }

    pub fn select_question(&mut self, question: QuestionId) {
        self.question = Some(question);
    }

    /// Forget this turn's category and question.
    pub fn clear_selection(&mut self) {
        self.category = None;
        self.question = None;
    }

    // === Turn counter ===

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn advance_turn(&mut self) {
        self.turn += 1;
    }

    // === Running flag ===

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the session. Scores and answered flags are left as they are.
    pub fn halt(&mut self) {
        self.running = false;
    }

    // === History ===

    pub fn record(&mut self, event: GameEvent) {
        self.history.push_back(event);
    }

    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }
}
