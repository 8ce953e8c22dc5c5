//! Terminal front-end.
//!
//! [`ConsoleInput`] prints the prompt for each [`InputRequest`] and reads
//! one line back. [`ConsoleOutput`] prints action outcomes as events
//! arrive. Both are generic over their streams so tests can drive them
//! with byte buffers.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::board::{Board, Question};
use crate::core::{EventKind, GameConfig, GameEvent};
use crate::session::{EventSink, InputRequest, InputSource, QUIT_SENTINEL};

/// Render the board as a grid: a column per category, a row per point
/// value (highest first). Answered cells show `X`; missing cells are blank.
///
/// Returns an empty string for a board without an index.
#[must_use]
pub fn render_board(board: &Board) -> String {
    let Some(index) = board.index() else {
        return String::new();
    };

    let columns: Vec<(&str, Vec<String>)> = index
        .categories()
        .iter()
        .map(|category| {
            let cells = index
                .values()
                .iter()
                .map(|&value| match index.cell(category, value).and_then(|id| board.question(id)) {
                    Some(question) if question.is_answered() => "X".to_string(),
                    Some(question) => question.value().to_string(),
                    None => String::new(),
                })
                .collect();
            (category.as_str(), cells)
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .map(|(header, cells)| {
            cells
                .iter()
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), 3])
                .max()
                .unwrap_or(3)
        })
        .collect();

    let row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:^width$}", cell))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let mut out = row(columns.iter().map(|(header, _)| *header).collect());
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for i in 0..index.values().len() {
        out.push_str(&row(columns.iter().map(|(_, cells)| cells[i].as_str()).collect()));
        out.push('\n');
    }
    out
}

/// Render a question with its options in key order.
#[must_use]
pub fn render_question(question: &Question) -> String {
    let mut out = format!(
        "{} for {}\n{}\n",
        question.category(),
        question.value(),
        question.prompt()
    );
    for option in question.options() {
        out.push_str(&format!("  {}) {}\n", option.key, option.text));
    }
    out
}

/// Prompts on a writer and reads trimmed lines from a reader.
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Print `prompt` and read one trimmed line. `Ok(None)` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask for a player count within the configured bounds, then a unique,
    /// non-blank name for each seat.
    pub fn prompt_roster(&mut self, config: &GameConfig) -> io::Result<Vec<String>> {
        let count = loop {
            let prompt = format!(
                "Enter number of players ({}-{}): ",
                config.min_players, config.max_players
            );
            let line = self.ask(&prompt)?.ok_or_else(end_of_input)?;
            match line.parse::<usize>() {
                Ok(count) if config.check_player_count(count).is_ok() => break count,
                _ => writeln!(
                    self.writer,
                    "Please enter a number between {} and {}.",
                    config.min_players, config.max_players
                )?,
            }
        };

        let mut names: Vec<String> = Vec::with_capacity(count);
        while names.len() < count {
            let line = self
                .ask(&format!("Enter name for player {}: ", names.len() + 1))?
                .ok_or_else(end_of_input)?;
            if line.is_empty() {
                writeln!(self.writer, "Name cannot be empty.")?;
            } else if names.iter().any(|name| name == &line) {
                writeln!(self.writer, "{line} is already playing.")?;
            } else {
                names.push(line);
            }
        }
        Ok(names)
    }

    fn prompt_for(request: &InputRequest<'_>) -> String {
        match request {
            InputRequest::Category { player, board } => format!(
                "\n{}\n{player}, choose a category (or {QUIT_SENTINEL}): ",
                render_board(board)
            ),
            InputRequest::Value { player, category } => {
                format!("{player}, choose a value in {category}: ")
            }
            InputRequest::Answer { player, question } => {
                format!("\n{}{player}, your answer: ", render_question(question))
            }
        }
    }
}

impl<R: BufRead, W: Write> InputSource for ConsoleInput<R, W> {
    fn next_line(&mut self, request: &InputRequest<'_>) -> Option<String> {
        match self.ask(&Self::prompt_for(request)) {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "console read failed");
                None
            }
        }
    }
}

fn end_of_input() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "input ended during setup")
}

/// Prints action outcomes.
pub struct ConsoleOutput<W> {
    writer: W,
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn print(&mut self, event: &GameEvent) -> io::Result<()> {
        if !event.is_player_action() {
            return Ok(());
        }
        writeln!(self.writer, "{}", event.message)?;
        if let (EventKind::AnswerQuestion, Some(score)) = (event.kind, event.score) {
            writeln!(self.writer, "{} now has {} pts", event.player, score)?;
        }
        Ok(())
    }
}

impl<W: Write> EventSink for ConsoleOutput<W> {
    fn record(&mut self, event: &GameEvent) {
        if let Err(err) = self.print(event) {
            warn!(error = %err, "console write failed");
        }
    }
}
