//! Everything that touches files or a terminal.
//!
//! - `loader`: question files into a [`Board`](crate::board::Board)
//! - `report`: the plain-text turn report and the CSV event log
//! - `console`: terminal rendering and the stdin/stdout collaborators

pub mod loader;
pub mod report;
pub mod console;

pub use loader::{load_board, CsvReader, JsonReader, QuestionReader, XmlReader, MAX_POINTS};
pub use report::{render_turn_report, write_event_log, write_event_log_file, write_turn_report};
pub use console::{render_board, render_question, ConsoleInput, ConsoleOutput};
