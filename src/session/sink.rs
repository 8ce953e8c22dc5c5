//! Output/report collaborator.
//!
//! The orchestrator hands every [`GameEvent`] to an [`EventSink`]
//! synchronously, before the next action runs.

use tracing::info;

use crate::core::GameEvent;

/// Receives events as they happen.
pub trait EventSink {
    fn record(&mut self, event: &GameEvent);
}

/// Discards everything.
impl EventSink for () {
    fn record(&mut self, _event: &GameEvent) {}
}

/// Keeps a copy of every event.
impl EventSink for Vec<GameEvent> {
    fn record(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Fans out to two sinks, left first.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn record(&mut self, event: &GameEvent) {
        self.0.record(event);
        self.1.record(event);
    }
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn record(&mut self, event: &GameEvent) {
        (**self).record(event);
    }
}

/// Logs each event through `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: &GameEvent) {
        info!(
            case_id = %event.case_id,
            turn = event.turn,
            player = %event.player,
            kind = %event.kind,
            category = event.category.as_deref(),
            value = event.value,
            answer = event.answer.as_deref(),
            success = event.success,
            score = event.score,
            "{}",
            event.message
        );
    }
}
