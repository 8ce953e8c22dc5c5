//! Game configuration.
//!
//! `GameConfig` collects the knobs the front-end needs at startup: roster
//! bounds, report destinations and the case identifier stamped on every
//! event. The core orchestrator itself accepts any non-empty roster.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Configuration for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Fewest players the front-end will seat.
    pub min_players: usize,

    /// Most players the front-end will seat.
    pub max_players: usize,

    /// Where the plain-text turn report goes.
    pub turn_report_path: PathBuf,

    /// Where the CSV event log goes.
    pub event_log_path: PathBuf,

    /// Identifier stamped on every event (e.g. `Game_001`).
    pub case_id: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 4,
            turn_report_path: PathBuf::from("TurnReport.txt"),
            event_log_path: PathBuf::from("LogReport.csv"),
            case_id: Self::case_id_for(1),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format a case identifier for the `n`th game (`Game_001`, ...).
    #[must_use]
    pub fn case_id_for(game_number: u32) -> String {
        format!("Game_{:03}", game_number)
    }

    #[must_use]
    pub fn with_player_bounds(mut self, min: usize, max: usize) -> Self {
        assert!(min >= 1, "Must allow at least 1 player");
        assert!(min <= max, "Minimum players cannot exceed maximum");
        self.min_players = min;
        self.max_players = max;
        self
    }

    #[must_use]
    pub fn with_case_id(mut self, case_id: impl Into<String>) -> Self {
        self.case_id = case_id.into();
        self
    }

    /// Put both reports under `dir`, keeping their file names.
    #[must_use]
    pub fn with_report_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.turn_report_path = dir.join(file_name_or(&self.turn_report_path, "TurnReport.txt"));
        self.event_log_path = dir.join(file_name_or(&self.event_log_path, "LogReport.csv"));
        self
    }

    /// Check a player count against the configured bounds.
    pub fn check_player_count(&self, count: usize) -> Result<(), SessionError> {
        if (self.min_players..=self.max_players).contains(&count) {
            Ok(())
        } else {
            Err(SessionError::RosterSize {
                min: self.min_players,
                max: self.max_players,
                actual: count,
            })
        }
    }
}

fn file_name_or<'a>(path: &'a Path, fallback: &'a str) -> &'a std::ffi::OsStr {
    path.file_name().unwrap_or_else(|| std::ffi::OsStr::new(fallback))
}
