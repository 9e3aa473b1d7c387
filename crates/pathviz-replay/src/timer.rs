use std::time::Duration;

use crate::app::{Effect, TickToken, TimerId};

/// A repeating timer owned by a player.
///
/// The timer never fires by itself: [`start`](Self::start) and
/// [`rearm`](Self::rearm) return the [`Effect::Tick`] a driver should
/// schedule, and [`accepts`](Self::accepts) decides whether a delivered
/// tick still belongs to the current run.
#[derive(Clone, Debug)]
pub struct Timer {
    id: TimerId,
    generation: u64,
    armed: bool,
}

impl Timer {
    pub fn new(id: TimerId) -> Self {
        Self {
            id,
            generation: 0,
            armed: false,
        }
    }

    #[inline]
    pub fn id(&self) -> TimerId {
        self.id
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[inline]
    pub fn token(&self) -> TickToken {
        TickToken {
            timer: self.id,
            generation: self.generation,
        }
    }

    /// Start a fresh run, invalidating ticks from any previous one.
    pub fn start(&mut self, after: Duration) -> Effect {
        self.generation += 1;
        self.armed = true;
        Effect::Tick {
            token: self.token(),
            after,
        }
    }

    /// Request the next tick of the current run.
    pub fn rearm(&self, after: Duration) -> Effect {
        Effect::Tick {
            token: self.token(),
            after,
        }
    }

    /// Stop the timer. Returns a cancel effect if it was running.
    pub fn cancel(&mut self) -> Option<Effect> {
        self.generation += 1;
        if std::mem::replace(&mut self.armed, false) {
            Some(Effect::Cancel(self.id))
        } else {
            None
        }
    }

    /// Whether `token` is a live tick of this timer.
    #[inline]
    pub fn accepts(&self, token: TickToken) -> bool {
        self.armed && token == self.token()
    }
}
