//! Structured game events.
//!
//! The orchestrator emits one [`GameEvent`] after every action execution,
//! plus a handful of session-level events attributed to the `System`
//! pseudo-player. Events are self-contained snapshots: they copy the
//! category, value and score at emission time because the next step will
//! mutate the session.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use super::action::{ActionKind, ActionResult};
use super::player::PlayerId;

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    StartGame,
    LoadQuestions,
    SelectPlayerCount,
    RegisterPlayer,
    SelectCategory,
    SelectQuestion,
    AnswerQuestion,
    GenerateReport,
    GenerateEventLog,
    ExitGame,
}

impl EventKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            EventKind::StartGame => "Start Game",
            EventKind::LoadQuestions => "Load File",
            EventKind::SelectPlayerCount => "Select Player Count",
            EventKind::RegisterPlayer => "Enter Player Name",
            EventKind::SelectCategory => ActionKind::SelectCategory.label(),
            EventKind::SelectQuestion => ActionKind::SelectQuestion.label(),
            EventKind::AnswerQuestion => ActionKind::AnswerQuestion.label(),
            EventKind::GenerateReport => "Generate Report",
            EventKind::GenerateEventLog => "Generate Event Log",
            EventKind::ExitGame => "Exit Game",
        }
    }

    /// The player action this event records, if any.
    #[must_use]
    pub const fn action(self) -> Option<ActionKind> {
        match self {
            EventKind::SelectCategory => Some(ActionKind::SelectCategory),
            EventKind::SelectQuestion => Some(ActionKind::SelectQuestion),
            EventKind::AnswerQuestion => Some(ActionKind::AnswerQuestion),
            _ => None,
        }
    }
}

impl From<ActionKind> for EventKind {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::SelectCategory => EventKind::SelectCategory,
            ActionKind::SelectQuestion => EventKind::SelectQuestion,
            ActionKind::AnswerQuestion => EventKind::AnswerQuestion,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single recorded event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub case_id: String,

    /// Turn number the event belongs to.
    pub turn: u32,

    pub player: PlayerId,

    pub kind: EventKind,

    /// Local wall-clock time, second precision.
    pub timestamp: NaiveDateTime,

    pub category: Option<String>,

    /// Point value of the selected question.
    pub value: Option<i64>,

    /// Prompt text of the selected question.
    pub prompt: Option<String>,

    /// Raw answer key submitted.
    pub answer: Option<String>,

    /// Option text the submitted key maps to, if it maps to one.
    pub answer_text: Option<String>,

    pub success: bool,

    /// Player's score after scoring was applied.
    pub score: Option<i64>,

    pub message: String,
}

impl GameEvent {
    /// Create an event stamped with the current local time.
    #[must_use]
    pub fn new(case_id: impl Into<String>, turn: u32, player: PlayerId, kind: EventKind) -> Self {
        Self {
            case_id: case_id.into(),
            turn,
            player,
            kind,
            timestamp: Local::now().naive_local().trunc_subsecs(0),
            category: None,
            value: None,
            prompt: None,
            answer: None,
            answer_text: None,
            success: true,
            score: None,
            message: String::new(),
        }
    }

    /// Create an event attributed to the `System` pseudo-player.
    #[must_use]
    pub fn system(case_id: impl Into<String>, turn: u32, kind: EventKind) -> Self {
        Self::new(case_id, turn, PlayerId::system(), kind)
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = category.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: Option<i64>) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: Option<&str>) -> Self {
        self.prompt = prompt.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_answer(mut self, answer: impl Into<String>, answer_text: Option<&str>) -> Self {
        self.answer = Some(answer.into());
        self.answer_text = answer_text.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }

    #[must_use]
    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Copy pass/fail and message from an action result.
    #[must_use]
    pub fn with_result(self, result: &ActionResult) -> Self {
        self.with_success(result.is_success())
            .with_message(result.message())
    }

    /// Check if this event was produced by a player action.
    #[must_use]
    pub fn is_player_action(&self) -> bool {
        self.kind.action().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_event() {
        let event = GameEvent::system("Game_001", 1, EventKind::StartGame);
        assert_eq!(event.player, PlayerId::system());
        assert!(event.success);
        assert!(!event.is_player_action());
        assert_eq!(event.timestamp.and_utc().timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_builder_fields() {
        let result = ActionResult::failure("Incorrect.");
        let event = GameEvent::new("Game_002", 4, PlayerId::new("Bob"), EventKind::AnswerQuestion)
            .with_category(Some("Arrays"))
            .with_value(Some(200))
            .with_answer("Z", None)
            .with_score(-200)
            .with_result(&result);

        assert_eq!(event.turn, 4);
        assert_eq!(event.category.as_deref(), Some("Arrays"));
        assert_eq!(event.value, Some(200));
        assert_eq!(event.answer.as_deref(), Some("Z"));
        assert!(event.answer_text.is_none());
        assert_eq!(event.score, Some(-200));
        assert!(!event.success);
        assert_eq!(event.message, "Incorrect.");
        assert!(event.is_player_action());
    }

    #[test]
    fn test_kind_mapping() {
        for kind in ActionKind::ALL {
            assert_eq!(EventKind::from(kind).action(), Some(kind));
        }
        assert_eq!(EventKind::ExitGame.action(), None);
        assert_eq!(EventKind::LoadQuestions.label(), "Load File");
    }

    #[test]
    fn test_setup_and_teardown_kinds() {
        let kinds = [
            (EventKind::SelectPlayerCount, "Select Player Count"),
            (EventKind::GenerateReport, "Generate Report"),
            (EventKind::GenerateEventLog, "Generate Event Log"),
        ];
        for (kind, label) in kinds {
            assert_eq!(kind.label(), label);
            assert_eq!(kind.action(), None);
        }
        assert_ne!(EventKind::GenerateReport, EventKind::GenerateEventLog);
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::new("Game_001", 1, PlayerId::new("Alice"), EventKind::SelectCategory)
            .with_category(Some("Arrays"));
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
