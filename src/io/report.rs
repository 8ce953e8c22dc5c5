//! End-of-game artifacts built from the session history.
//!
//! ## Turn report
//!
//! Plain text, one block per selected question:
//!
//! ```text
//! Turn 1: Alice selected Arrays for 100 pts
//! Question: First index?
//! Answer: 0 - Correct (+100 pts)
//! Score after turn: Alice = 100
//! ```
//!
//! A question that goes round the table gets one `Answer:` pair per
//! attempt.
//!
//! ## Event log
//!
//! One CSV row per [`GameEvent`], system events included.

use std::io::Write;
use std::path::Path;

use im::Vector;
use serde::Serialize;
use tracing::info;

use crate::core::{EventKind, GameEvent};
use crate::error::ReportError;
use crate::turns::Standing;

const RULE: &str = "================================";

/// Render the turn report as a string.
#[must_use]
pub fn render_turn_report(case_id: &str, history: &Vector<GameEvent>, standings: &[Standing]) -> String {
    let players: Vec<&str> = standings.iter().map(|s| s.player.as_str()).collect();
    let mut lines = vec![
        "JEOPARDY PROGRAMMING GAME REPORT".to_string(),
        RULE.to_string(),
        format!("Case ID: {case_id}"),
        format!("Players: {}", players.join(", ")),
        String::new(),
        "Gameplay Summary:".to_string(),
        RULE.to_string(),
    ];

    for event in history.iter().filter(|e| e.success || e.kind == EventKind::AnswerQuestion) {
        match event.kind {
            EventKind::SelectQuestion => {
                lines.push(String::new());
                lines.push(format!(
                    "Turn {}: {} selected {} for {} pts",
                    event.turn,
                    event.player,
                    event.category.as_deref().unwrap_or_default(),
                    event.value.unwrap_or_default()
                ));
                lines.push(format!("Question: {}", event.prompt.as_deref().unwrap_or_default()));
            }
            EventKind::AnswerQuestion => {
                let answer = event
                    .answer_text
                    .as_deref()
                    .or(event.answer.as_deref())
                    .unwrap_or_default();
                let value = event.value.unwrap_or_default();
                let verdict = if event.success {
                    format!("Correct (+{value} pts)")
                } else {
                    format!("Incorrect (-{value} pts)")
                };
                lines.push(format!("Answer: {answer} - {verdict}"));
                lines.push(format!(
                    "Score after turn: {} = {}",
                    event.player,
                    event.score.unwrap_or_default()
                ));
            }
            _ => {}
        }
    }

    lines.push(String::new());
    lines.push("Final Scores:".to_string());
    lines.extend(standings.iter().map(|s| format!("{}: {}", s.player, s.score)));
    lines.push(RULE.to_string());
    lines.push("END OF REPORT".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Write the turn report to `path`, replacing any existing file.
pub fn write_turn_report(
    path: impl AsRef<Path>,
    case_id: &str,
    history: &Vector<GameEvent>,
    standings: &[Standing],
) -> Result<(), ReportError> {
    let path = path.as_ref();
    std::fs::write(path, render_turn_report(case_id, history, standings))?;
    info!(path = %path.display(), "turn report written");
    Ok(())
}

/// One row of the event log.
#[derive(Serialize)]
struct EventRow<'a> {
    #[serde(rename = "Case_ID")]
    case_id: &'a str,

    #[serde(rename = "Player_ID")]
    player: &'a str,

    #[serde(rename = "Activity")]
    activity: &'static str,

    #[serde(rename = "Timestamp")]
    timestamp: String,

    #[serde(rename = "Category")]
    category: &'a str,

    #[serde(rename = "Question_Value")]
    value: Option<i64>,

    #[serde(rename = "Answer_Given")]
    answer: &'a str,

    #[serde(rename = "Result")]
    result: &'static str,

    #[serde(rename = "Score_After_Play")]
    score: Option<i64>,
}

impl<'a> From<&'a GameEvent> for EventRow<'a> {
    fn from(event: &'a GameEvent) -> Self {
        let result = match (event.kind, event.success) {
            (EventKind::AnswerQuestion, true) => "Correct",
            (EventKind::AnswerQuestion, false) => "Incorrect",
            (_, true) => "Success",
            (_, false) => "Failure",
        };
        Self {
            case_id: &event.case_id,
            player: event.player.as_str(),
            activity: event.kind.label(),
            timestamp: event.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            category: event.category.as_deref().unwrap_or_default(),
            value: event.value,
            answer: event.answer.as_deref().unwrap_or_default(),
            result,
            score: event.score,
        }
    }
}

/// Write the event log as CSV to any writer.
pub fn write_event_log<W: Write>(writer: W, history: &Vector<GameEvent>) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for event in history {
        csv.serialize(EventRow::from(event))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the event log to `path`, replacing any existing file.
pub fn write_event_log_file(path: impl AsRef<Path>, history: &Vector<GameEvent>) -> Result<(), ReportError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_event_log(std::io::BufWriter::new(file), history)?;
    info!(path = %path.display(), events = history.len(), "event log written");
    Ok(())
}
