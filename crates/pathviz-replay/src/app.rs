//! The update loop contract: [`Model`], [`Effect`] and the timer tokens
//! that tie a delivered tick back to the timer that asked for it.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::msg::Msg;

/// Cooperative cancellation flag shared between a driver and its caller.
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

/// Identifies one timer slot. Each player owns two: play and hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerId(pub u32);

/// A timer generation stamp carried by every tick.
///
/// A tick is only honoured while its token matches the issuing timer's
/// current one; cancelling or restarting the timer makes older tokens stale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickToken {
    pub timer: TimerId,
    pub generation: u64,
}

impl fmt::Display for TickToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer {}#{}", self.timer.0, self.generation)
    }
}

/// A side effect requested by [`Model::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg::Tick(token)` once `after` has elapsed.
    Tick { token: TickToken, after: Duration },
    /// Drop every pending tick issued by this timer.
    Cancel(TimerId),
    /// Several effects, applied in order.
    Batch(Vec<Effect>),
}

impl Effect {
    /// Combine optional effects, flattening nested batches.
    ///
    /// Returns `None` when nothing is left and the bare effect when only
    /// one is.
    pub fn batch(effects: impl IntoIterator<Item = Option<Effect>>) -> Option<Effect> {
        let mut out = Vec::new();
        for e in effects.into_iter().flatten() {
            match e {
                Effect::Batch(v) => out.extend(v),
                e => out.push(e),
            }
        }
        match out.len() {
            0 => None,
            1 => out.pop(),
            _ => Some(Effect::Batch(out)),
        }
    }

    /// The effect as a flat list.
    pub fn into_vec(self) -> Vec<Effect> {
        match self {
            Effect::Batch(v) => v.into_iter().flat_map(Effect::into_vec).collect(),
            e => vec![e],
        }
    }
}

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(n: u64) -> Effect {
        Effect::Tick {
            token: TickToken {
                timer: TimerId(0),
                generation: n,
            },
            after: Duration::from_millis(10),
        }
    }

    #[test]
    fn batch_collapses() {
        assert_eq!(Effect::batch([None, None]), None);
        assert_eq!(Effect::batch([None, Some(tick(1))]), Some(tick(1)));
        let nested = Effect::batch([
            Some(Effect::Batch(vec![tick(1), Effect::Cancel(TimerId(2))])),
            Some(tick(3)),
        ]);
        assert_eq!(
            nested,
            Some(Effect::Batch(vec![
                tick(1),
                Effect::Cancel(TimerId(2)),
                tick(3)
            ]))
        );
    }

    #[test]
    fn context_cancel_is_shared() {
        let ctx = Context::new();
        let other = ctx.clone();
        assert!(!other.is_done());
        ctx.cancel();
        assert!(other.is_done());
    }
}
