//! Turn rules: which action each phase permits and where results lead.
//!
//! The orchestrator asks the player's [`Phase`] whether an action is legal,
//! runs it, and feeds the result back through [`Phase::next`]. The rules
//! never interpret the board or scoring directly.

pub mod phase;

pub use phase::Phase;
