//! Turn ordering.
//!
//! - `scheduler`: strict round-robin queue of players
//! - `second_chance`: bookkeeping for letting other players attempt a
//!   question the selector missed

pub mod scheduler;
pub mod second_chance;

pub use scheduler::{Standing, TurnScheduler};
pub use second_chance::SecondChance;
