//! The turn loop.
//!
//! ## Turn shape
//!
//! 1. The front player enters `SelectingCategory` and is prompted until a
//!    category with an open question is chosen.
//! 2. Same for a point value within that category.
//! 3. The second-chance cycle: the current player answers, is scored,
//!    and the queue rotates. Repeats until the question is answered or
//!    the next player would be the one who picked it.
//! 4. The turn counter advances; the game ends once no open question
//!    remains.
//!
//! `QUIT` (or end of input) at any prompt ends the session immediately.
//! Whatever was already scored stays scored.

use std::ops::ControlFlow;

use tracing::{debug, info, warn};

use super::input::{is_quit, InputRequest, InputSource};
use super::sink::EventSink;
use crate::board::{Board, Question, QuestionId};
use crate::core::{ActionKind, ActionResult, EventKind, GameEvent, Player, PlayerId, SessionContext};
use crate::error::SessionError;
use crate::rules::Phase;
use crate::turns::{SecondChance, Standing, TurnScheduler};

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every question was answered.
    Completed,

    /// A player entered the quit sentinel, or input ran out.
    Quit,
}

/// Result of [`Orchestrator::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub case_id: String,
    pub outcome: SessionOutcome,

    /// Turns that ran to the end of their second-chance cycle.
    pub turns_played: u32,

    /// Questions still open when the session ended.
    pub questions_remaining: usize,

    /// Final scores in seating order.
    pub standings: Vec<Standing>,
}

impl SessionSummary {
    /// Everyone sharing the top score. Empty only for an empty roster.
    #[must_use]
    pub fn leaders(&self) -> Vec<&Standing> {
        let Some(best) = self.standings.iter().map(|s| s.score).max() else {
            return Vec::new();
        };
        self.standings.iter().filter(|s| s.score == best).collect()
    }
}

/// Drives a game over a board, a roster and two collaborators.
pub struct Orchestrator<I, S> {
    board: Board,
    scheduler: TurnScheduler,
    context: SessionContext,
    input: I,
    sink: S,
}

impl<I: InputSource, S: EventSink> Orchestrator<I, S> {
    pub fn new(board: Board, scheduler: TurnScheduler, context: SessionContext, input: I, sink: S) -> Self {
        Self {
            board,
            scheduler,
            context,
            input,
            sink,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    #[must_use]
    pub fn input(&self) -> &I {
        &self.input
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Hand back the collaborators.
    pub fn into_parts(self) -> (Board, TurnScheduler, SessionContext, I, S) {
        (self.board, self.scheduler, self.context, self.input, self.sink)
    }

    /// Record a session-level event attributed to `System`.
    pub fn record_system(&mut self, kind: EventKind, message: impl Into<String>) {
        let event = GameEvent::system(self.context.case_id(), self.context.turn(), kind)
            .with_message(message);
        self.emit(event);
    }

    /// Play until the board is exhausted or someone quits.
    pub fn run(&mut self) -> Result<SessionSummary, SessionError> {
        self.ensure_ready()?;
        info!(
            case_id = self.context.case_id(),
            players = self.scheduler.len(),
            questions = self.board.len(),
            "session started"
        );
        self.record_system(EventKind::StartGame, "Game started");

        let outcome = loop {
            if !self.context.is_running() {
                break SessionOutcome::Quit;
            }
            if !self.board.has_open_questions() {
                break SessionOutcome::Completed;
            }
            if self.play_turn()?.is_break() {
                break SessionOutcome::Quit;
            }
            self.context.advance_turn();
        };
        self.context.halt();

        let summary = self.summary(outcome);
        info!(
            case_id = %summary.case_id,
            outcome = ?summary.outcome,
            turns = summary.turns_played,
            remaining = summary.questions_remaining,
            "session finished"
        );
        Ok(summary)
    }

    /// Snapshot the session as it stands.
    #[must_use]
    pub fn summary(&self, outcome: SessionOutcome) -> SessionSummary {
        SessionSummary {
            case_id: self.context.case_id().to_string(),
            outcome,
            turns_played: self.context.turn().saturating_sub(1),
            questions_remaining: self.board.open_count(),
            standings: self.scheduler.standings(),
        }
    }

    fn ensure_ready(&self) -> Result<(), SessionError> {
        if self.board.is_empty() {
            return Err(SessionError::EmptyBoard);
        }
        if !self.board.is_indexed() {
            return Err(SessionError::BoardNotIndexed);
        }
        if self.scheduler.is_empty() {
            return Err(SessionError::NoCurrentPlayer);
        }
        Ok(())
    }

    /// Play one turn. `Break` means the session is over.
    fn play_turn(&mut self) -> Result<ControlFlow<()>, SessionError> {
        self.context.clear_selection();
        let origin = self.current_id()?.clone();
        debug!(
            turn = self.context.turn(),
            player = %origin,
            open = self.board.open_count(),
            "turn started"
        );

        self.current_mut()?.enter(Phase::SelectingCategory);
        while self.current()?.phase() == Phase::SelectingCategory {
            let Some(line) = self.read(ActionKind::SelectCategory)? else {
                return Ok(ControlFlow::Break(()));
            };
            let mut result = self.perform(ActionKind::SelectCategory, &line)?;

            let exhausted = self
                .context
                .selected_category()
                .filter(|category| !self.board.has_open_questions_in(category))
                .map(str::to_string);
            if let (true, Some(category)) = (result.is_success(), exhausted) {
                result = ActionResult::failure(format!(
                    "No open questions left in {}. Please choose another category.",
                    category
                ));
                self.current_mut()?.enter(Phase::SelectingCategory);
            }

            let event = self
                .event(EventKind::SelectCategory)?
                .with_category(self.context.selected_category())
                .with_result(&result);
            self.emit(event);
        }

        while self.current()?.phase() == Phase::SelectingQuestion {
            let Some(line) = self.read(ActionKind::SelectQuestion)? else {
                return Ok(ControlFlow::Break(()));
            };
            let result = self.perform(ActionKind::SelectQuestion, &line)?;

            let prompt = self
                .context
                .selected_question()
                .and_then(|id| self.board.question(id))
                .map(Question::prompt);
            let event = self
                .event(EventKind::SelectQuestion)?
                .with_category(self.context.selected_category())
                .with_value(line.trim().parse().ok())
                .with_prompt(prompt)
                .with_result(&result);
            self.emit(event);
        }

        let question = self
            .context
            .selected_question()
            .ok_or(SessionError::NoQuestionSelected)?;
        let mut cycle = SecondChance::begin(origin);
        loop {
            if self.answer_attempt(question)?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
            cycle.record_attempt();

            let answered = self.board.question(question).is_some_and(Question::is_answered);
            let next = self.scheduler.current_player().map(Player::id);
            if !cycle.should_continue(answered, next) {
                break;
            }
        }
        debug!(
            turn = self.context.turn(),
            attempts = cycle.attempts(),
            origin = %cycle.origin(),
            "question cycle finished"
        );

        Ok(ControlFlow::Continue(()))
    }

    /// One answer from the current player: score it, record it, rotate.
    fn answer_attempt(&mut self, id: QuestionId) -> Result<ControlFlow<()>, SessionError> {
        self.current_mut()?.enter(Phase::AnsweringQuestion);
        let Some(line) = self.read(ActionKind::AnswerQuestion)? else {
            return Ok(ControlFlow::Break(()));
        };
        let result = self.perform(ActionKind::AnswerQuestion, &line)?;

        let question = self.board.question(id).ok_or(SessionError::NoQuestionSelected)?;
        let value = question.value();
        let category = question.category().to_string();
        let answer_text = question.option_text(&line).map(str::to_string);

        let score = self.current_mut()?.settle(result.is_success(), value);
        let event = self
            .event(EventKind::AnswerQuestion)?
            .with_category(Some(category.as_str()))
            .with_value(Some(value))
            .with_answer(&line, answer_text.as_deref())
            .with_score(score)
            .with_result(&result);
        self.emit(event);

        self.scheduler.advance();
        Ok(ControlFlow::Continue(()))
    }

    /// Prompt the current player. `None` means the session was halted.
    fn read(&mut self, kind: ActionKind) -> Result<Option<String>, SessionError> {
        let player = self
            .scheduler
            .current_player()
            .map(Player::id)
            .ok_or(SessionError::NoCurrentPlayer)?;

        let request = match kind {
            ActionKind::SelectCategory => InputRequest::Category {
                player,
                board: &self.board,
            },
            ActionKind::SelectQuestion => InputRequest::Value {
                player,
                category: self.context.selected_category().unwrap_or_default(),
            },
            ActionKind::AnswerQuestion => InputRequest::Answer {
                player,
                question: self
                    .context
                    .selected_question()
                    .and_then(|id| self.board.question(id))
                    .ok_or(SessionError::NoQuestionSelected)?,
            },
        };

        match self.input.next_line(&request) {
            Some(line) if !is_quit(&line) => Ok(Some(line)),
            Some(_) => {
                info!(player = %player, action = %kind, "player quit");
                self.context.halt();
                Ok(None)
            }
            None => {
                info!(player = %player, action = %kind, "input exhausted");
                self.context.halt();
                Ok(None)
            }
        }
    }

    /// Run `kind` for the current player with `line` as input.
    fn perform(&mut self, kind: ActionKind, line: &str) -> Result<ActionResult, SessionError> {
        let action = kind.action();
        if !action.validate_preconditions(&self.board, &self.context) {
            warn!(action = %kind, turn = self.context.turn(), "structural precondition not met");
        }
        let player = self
            .scheduler
            .current_player_mut()
            .ok_or(SessionError::NoCurrentPlayer)?;
        Ok(player.attempt(action, &mut self.board, &mut self.context, Some(line)))
    }

    /// Start an event for the current player.
    fn event(&self, kind: EventKind) -> Result<GameEvent, SessionError> {
        Ok(GameEvent::new(
            self.context.case_id(),
            self.context.turn(),
            self.current_id()?.clone(),
            kind,
        ))
    }

    fn emit(&mut self, event: GameEvent) {
        self.sink.record(&event);
        self.context.record(event);
    }

    fn current(&self) -> Result<&Player, SessionError> {
        self.scheduler.current_player().ok_or(SessionError::NoCurrentPlayer)
    }

    fn current_mut(&mut self) -> Result<&mut Player, SessionError> {
        self.scheduler
            .current_player_mut()
            .ok_or(SessionError::NoCurrentPlayer)
    }

    fn current_id(&self) -> Result<&PlayerId, SessionError> {
        self.current().map(Player::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ScriptedInput;

    fn board() -> Board {
        let options = [("A", "ans1"), ("B", "ans2"), ("C", "ans3"), ("D", "ans4")];
        let mut board: Board = [
            Question::new("Arrays", 100, "Q1", options, "A"),
            Question::new("Arrays", 200, "Q2", options, "B"),
            Question::new("Loops", 100, "Q3", options, "C"),
        ]
        .into_iter()
        .collect();
        board.rebuild_index().unwrap();
        board
    }

    fn orchestrator(
        players: &[&str],
        script: &[&str],
    ) -> Orchestrator<ScriptedInput, Vec<GameEvent>> {
        Orchestrator::new(
            board(),
            TurnScheduler::with_players(players.iter().copied()).unwrap(),
            SessionContext::new("Game_001"),
            ScriptedInput::new(script.iter().copied()),
            Vec::new(),
        )
    }

    fn score(orch: &Orchestrator<ScriptedInput, Vec<GameEvent>>, id: &str) -> i64 {
        orch.scheduler().player(&PlayerId::new(id)).unwrap().score()
    }

    #[test]
    fn test_correct_answer_scores_and_closes() {
        let mut orch = orchestrator(&["Alice", "Bob"], &["arr", "100", "a", "QUIT"]);
        let summary = orch.run().unwrap();

        assert_eq!(summary.outcome, SessionOutcome::Quit);
        assert_eq!(summary.turns_played, 1);
        assert_eq!(summary.questions_remaining, 2);
        assert_eq!(score(&orch, "Alice"), 100);
        assert_eq!(score(&orch, "Bob"), 0);
        assert!(orch.board().question(QuestionId::new(0)).unwrap().is_answered());
        assert_eq!(orch.scheduler().current_player().unwrap().id().as_str(), "Bob");
    }

    #[test]
    fn test_wrong_answer_passes_to_next_player() {
        let mut orch = orchestrator(&["Alice", "Bob", "Cara"], &["Arrays", "200", "A", "B", "QUIT"]);
        orch.run().unwrap();

        assert_eq!(score(&orch, "Alice"), -200);
        assert_eq!(score(&orch, "Bob"), 200);
        assert_eq!(score(&orch, "Cara"), 0);
        assert!(orch.board().question(QuestionId::new(1)).unwrap().is_answered());

        // Bob answered, so Cara is up and she picks next.
        assert_eq!(orch.scheduler().current_player().unwrap().id().as_str(), "Cara");
        let last = orch.input().served().last().unwrap();
        assert_eq!(last, &(PlayerId::new("Cara"), ActionKind::SelectCategory));
    }

    #[test]
    fn test_everyone_wrong_leaves_question_open() {
        let mut orch = orchestrator(&["Alice", "Bob"], &["Loops", "100", "A", "B", "QUIT"]);
        orch.run().unwrap();

        assert_eq!(score(&orch, "Alice"), -100);
        assert_eq!(score(&orch, "Bob"), -100);
        assert!(!orch.board().question(QuestionId::new(2)).unwrap().is_answered());
        assert_eq!(orch.scheduler().current_player().unwrap().id().as_str(), "Alice");
    }

    #[test]
    fn test_retry_until_valid_selection() {
        let mut orch = orchestrator(&["Alice", "Bob"], &["Zebra", "arr", "999", "abc", "100", "A", "QUIT"]);
        orch.run().unwrap();

        let failures = orch.sink().iter().filter(|e| e.is_player_action() && !e.success).count();
        assert_eq!(failures, 3);
        assert_eq!(score(&orch, "Alice"), 100);
    }

    #[test]
    fn test_exhausted_category_is_refused() {
        let mut orch = orchestrator(&["Alice"], &["Loops", "100", "C", "Loops", "Arrays", "100", "QUIT"]);
        orch.run().unwrap();

        let refused = orch
            .sink()
            .iter()
            .find(|e| e.kind == EventKind::SelectCategory && !e.success)
            .unwrap();
        assert!(refused.message.starts_with("No open questions left in Loops"));
        assert_eq!(refused.turn, 2);
    }

    #[test]
    fn test_completed_when_board_exhausted() {
        let mut orch = orchestrator(&["Solo"], &["Arrays", "100", "A", "Arrays", "200", "B", "Loops", "100", "C"]);
        let summary = orch.run().unwrap();

        assert_eq!(summary.outcome, SessionOutcome::Completed);
        assert_eq!(summary.turns_played, 3);
        assert_eq!(summary.questions_remaining, 0);
        assert_eq!(summary.standings[0].score, 400);
        assert_eq!(orch.input().remaining(), 0);
        assert!(!orch.context().is_running());
    }

    #[test]
    fn test_end_of_input_is_quit() {
        let mut orch = orchestrator(&["Alice", "Bob"], &["Arrays"]);
        let summary = orch.run().unwrap();
        assert_eq!(summary.outcome, SessionOutcome::Quit);
        assert_eq!(summary.turns_played, 0);
    }

    #[test]
    fn test_refuses_unready_session() {
        let mut unindexed: Board = [Question::new("X", 1, "?", [("A", "a")], "A")].into_iter().collect();
        let mut orch = Orchestrator::new(
            unindexed.clone(),
            TurnScheduler::with_players(["Alice"]).unwrap(),
            SessionContext::new("Game_001"),
            ScriptedInput::default(),
            (),
        );
        assert!(matches!(orch.run(), Err(SessionError::BoardNotIndexed)));

        unindexed.rebuild_index().unwrap();
        let mut orch = Orchestrator::new(
            unindexed,
            TurnScheduler::new(),
            SessionContext::new("Game_001"),
            ScriptedInput::default(),
            (),
        );
        assert!(matches!(orch.run(), Err(SessionError::NoCurrentPlayer)));

        let mut orch = Orchestrator::new(
            Board::new(),
            TurnScheduler::with_players(["Alice"]).unwrap(),
            SessionContext::new("Game_001"),
            ScriptedInput::default(),
            (),
        );
        assert!(matches!(orch.run(), Err(SessionError::EmptyBoard)));
    }

    #[test]
    fn test_events_land_in_history_and_sink() {
        let mut orch = orchestrator(&["Alice", "Bob"], &["Arrays", "100", "A", "QUIT"]);
        orch.run().unwrap();

        let kinds: Vec<EventKind> = orch.sink().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                EventKind::StartGame,
                EventKind::SelectCategory,
                EventKind::SelectQuestion,
                EventKind::AnswerQuestion,
            ]
        );
        assert_eq!(orch.context().history().len(), orch.sink().len());

        let answer = &orch.sink()[3];
        assert_eq!(answer.player.as_str(), "Alice");
        assert_eq!(answer.answer_text.as_deref(), Some("ans1"));
        assert_eq!(answer.score, Some(100));
        assert_eq!(answer.message, "Correct!");
    }

    #[test]
    fn test_leaders_with_tie() {
        let summary = SessionSummary {
            case_id: "Game_001".into(),
            outcome: SessionOutcome::Completed,
            turns_played: 2,
            questions_remaining: 0,
            standings: vec![
                Standing { player: PlayerId::new("A"), score: 100 },
                Standing { player: PlayerId::new("B"), score: 100 },
                Standing { player: PlayerId::new("C"), score: -50 },
            ],
        };
        let names: Vec<_> = summary.leaders().iter().map(|s| s.player.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }
}
