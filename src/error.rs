//! Error types.
//!
//! Player mistakes are never errors: they come back as failed
//! [`ActionResult`](crate::core::ActionResult)s. The enums here cover setup
//! problems (loading, roster) and orchestrator defects.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::PlayerId;

/// Errors raised while building or indexing a [`Board`](crate::board::Board).
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("more than one question for {category} at {value} points")]
    DuplicateCell { category: String, value: i64 },
}

/// Errors raised by question loaders.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported question file format: {0} (supported: .json, .csv, .xml)")]
    UnsupportedFormat(String),

    #[error("invalid JSON question file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV question file: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid XML question file: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("failed to read question data: {0}")]
    Read(#[from] std::io::Error),

    #[error("no usable questions in {}", .0.display())]
    Empty(PathBuf),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Errors that stop a session from starting or continuing.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no questions loaded")]
    EmptyBoard,

    #[error("board index has not been built")]
    BoardNotIndexed,

    #[error("no current player")]
    NoCurrentPlayer,

    #[error("no question selected for the answering phase")]
    NoQuestionSelected,

    #[error("player {0} is already seated")]
    DuplicatePlayer(PlayerId),

    #[error("player names cannot be blank")]
    BlankPlayerId,

    #[error("roster must have between {min} and {max} players, got {actual}")]
    RosterSize { min: usize, max: usize, actual: usize },
}

/// Errors raised while writing reports.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write event log: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_cell_display() {
        let error = BoardError::DuplicateCell {
            category: "Arrays".to_string(),
            value: 100,
        };
        assert_eq!(error.to_string(), "more than one question for Arrays at 100 points");
    }

    #[test]
    fn test_load_error_from_board_error() {
        let error: LoadError = BoardError::DuplicateCell {
            category: "Loops".to_string(),
            value: 200,
        }
        .into();
        assert!(error.to_string().contains("Loops"));
    }
}
