//! Round-robin turn scheduler.
//!
//! Players sit in a queue. The front player is the current player;
//! [`TurnScheduler::advance`] moves them to the back and resets them to
//! [`Phase::Waiting`]. Relative order never changes otherwise, so for N
//! players, N advances return the queue to where it started.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Player, PlayerId};
use crate::error::SessionError;
use crate::rules::Phase;

/// A player's final (or current) score, for reports and summaries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub score: i64,
}

/// Queue of players in turn order.
#[derive(Clone, Debug, Default)]
pub struct TurnScheduler {
    queue: VecDeque<Player>,

    /// Join order, for reporting. Never rotated.
    seating: Vec<PlayerId>,
}

impl TurnScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scheduler from names in seating order.
    pub fn with_players<I, P>(ids: I) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PlayerId>,
    {
        let mut scheduler = Self::new();
        for id in ids {
            scheduler.add_player(id)?;
        }
        Ok(scheduler)
    }

    /// Seat a new player at the back of the queue.
    ///
    /// Names must be non-blank and unique within the session.
    pub fn add_player(&mut self, id: impl Into<PlayerId>) -> Result<(), SessionError> {
        let id = id.into();
        if id.as_str().trim().is_empty() {
            return Err(SessionError::BlankPlayerId);
        }
        if self.seating.contains(&id) {
            return Err(SessionError::DuplicatePlayer(id));
        }
        self.seating.push(id.clone());
        self.queue.push_back(Player::new(id));
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Peek at the front of the queue.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.queue.front()
    }

    pub fn current_player_mut(&mut self) -> Option<&mut Player> {
        self.queue.front_mut()
    }

    /// Move the front player to the back and reset them to `Waiting`.
    pub fn advance(&mut self) {
        if let Some(mut player) = self.queue.pop_front() {
            player.enter(Phase::Waiting);
            debug!(player = %player.id(), "rotated to back of queue");
            self.queue.push_back(player);
        }
    }

    /// Players in current turn order, front first.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.queue.iter()
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.queue.iter().find(|p| p.id() == id)
    }

    /// Player ids in join order.
    #[must_use]
    pub fn seating(&self) -> &[PlayerId] {
        &self.seating
    }

    /// Scores in join order.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        self.seating
            .iter()
            .filter_map(|id| self.player(id))
            .map(|p| Standing {
                player: p.id().clone(),
                score: p.score(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front(scheduler: &TurnScheduler) -> &str {
        scheduler.current_player().unwrap().id().as_str()
    }

    #[test]
    fn test_current_player_is_first_added() {
        let scheduler = TurnScheduler::with_players(["Player1", "Player2"]).unwrap();
        assert_eq!(front(&scheduler), "Player1");
        assert_eq!(scheduler.len(), 2);
    }

    #[test]
    fn test_rotation_cycle() {
        let mut scheduler = TurnScheduler::with_players(["player1", "player2", "player3"]).unwrap();
        assert_eq!(front(&scheduler), "player1");
        scheduler.advance();
        assert_eq!(front(&scheduler), "player2");
        scheduler.advance();
        assert_eq!(front(&scheduler), "player3");
        scheduler.advance();
        assert_eq!(front(&scheduler), "player1");
    }

    #[test]
    fn test_advance_resets_phase() {
        let mut scheduler = TurnScheduler::with_players(["Alice", "Bob"]).unwrap();
        scheduler.current_player_mut().unwrap().enter(Phase::AnsweringQuestion);
        scheduler.advance();

        let alice = scheduler.player(&PlayerId::new("Alice")).unwrap();
        assert_eq!(alice.phase(), Phase::Waiting);
    }

    #[test]
    fn test_score_follows_player_through_rotation() {
        let mut scheduler = TurnScheduler::with_players(["player1", "player2"]).unwrap();
        scheduler.current_player_mut().unwrap().settle(true, 200);
        scheduler.advance();

        assert_eq!(front(&scheduler), "player2");
        let standings = scheduler.standings();
        assert_eq!(standings[0], Standing { player: PlayerId::new("player1"), score: 200 });
        assert_eq!(standings[1].score, 0);
    }

    #[test]
    fn test_standings_use_seating_order() {
        let mut scheduler = TurnScheduler::with_players(["A", "B", "C"]).unwrap();
        scheduler.advance();
        scheduler.advance();

        let order: Vec<_> = scheduler.standings().into_iter().map(|s| s.player).collect();
        assert_eq!(order, [PlayerId::new("A"), PlayerId::new("B"), PlayerId::new("C")]);
        let queue: Vec<_> = scheduler.players().map(|p| p.id().as_str()).collect();
        assert_eq!(queue, ["C", "A", "B"]);
    }

    #[test]
    fn test_duplicate_and_blank_names_rejected() {
        let err = TurnScheduler::with_players(["Alice", "Alice"]).unwrap_err();
        assert!(matches!(err, SessionError::DuplicatePlayer(id) if id.as_str() == "Alice"));

        let err = TurnScheduler::with_players(["  "]).unwrap_err();
        assert!(matches!(err, SessionError::BlankPlayerId));
    }

    #[test]
    fn test_empty_scheduler() {
        let mut scheduler = TurnScheduler::new();
        assert!(scheduler.current_player().is_none());
        scheduler.advance();
        assert!(scheduler.is_empty());
    }
}
