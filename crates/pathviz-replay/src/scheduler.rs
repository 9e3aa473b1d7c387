//! Drivers that turn [`Effect`]s into delivered ticks.
//!
//! [`Scheduler`] keeps pending ticks in a min-heap keyed by
//! `(due, insertion order)`, so ticks due at the same instant fire in the
//! order they were requested. Time is virtual: it only moves when the
//! caller advances it, which keeps playback fully deterministic under test.
//! [`Scheduler::run_realtime`] sleeps between ticks for interactive use.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::app::{Context, Effect, Model, TickToken};
use crate::msg::Msg;

#[derive(Debug)]
struct Pending {
    due: Duration,
    seq: u64,
    token: TickToken,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A virtual-time tick queue.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    queue: BinaryHeap<Reverse<Pending>>,
    seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of ticks waiting to fire.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// When the next tick is due, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(p)| p.due)
    }

    /// Apply an effect to the queue.
    pub fn schedule(&mut self, effect: Effect) {
        match effect {
            Effect::Tick { token, after } => {
                let seq = self.seq;
                self.seq += 1;
                self.queue.push(Reverse(Pending {
                    due: self.now + after,
                    seq,
                    token,
                }));
            }
            Effect::Cancel(id) => {
                self.queue.retain(|Reverse(p)| p.token.timer != id);
            }
            Effect::Batch(effects) => {
                for e in effects {
                    self.schedule(e);
                }
            }
        }
    }

    /// Deliver `msg` to `model` now and schedule whatever it asks for.
    pub fn dispatch<M: Model>(&mut self, model: &mut M, msg: Msg) {
        if let Some(effect) = model.update(msg) {
            self.schedule(effect);
        }
    }

    /// Move time forward by `dt`, firing every tick that falls due on the
    /// way, including ticks scheduled by those ticks. Returns how many
    /// fired.
    pub fn advance<M: Model>(&mut self, model: &mut M, dt: Duration) -> usize {
        let target = self.now + dt;
        let mut fired = 0;
        while let Some(due) = self.next_due() {
            if due > target {
                break;
            }
            let Some(Reverse(p)) = self.queue.pop() else {
                break;
            };
            self.now = p.due;
            self.dispatch(model, Msg::Tick(p.token));
            fired += 1;
        }
        self.now = target;
        fired
    }

    /// Fire ticks in order until none are pending or `limit` have fired.
    pub fn run_until_idle<M: Model>(&mut self, model: &mut M, limit: usize) -> usize {
        let mut fired = 0;
        while fired < limit {
            let Some(Reverse(p)) = self.queue.pop() else {
                break;
            };
            self.now = self.now.max(p.due);
            self.dispatch(model, Msg::Tick(p.token));
            fired += 1;
        }
        fired
    }

    /// Fire ticks on the wall clock until none are pending or `ctx` is
    /// cancelled, calling `observe` after each one.
    pub fn run_realtime<M: Model>(
        &mut self,
        model: &mut M,
        ctx: &Context,
        mut observe: impl FnMut(&M),
    ) -> usize {
        let mut fired = 0;
        while !ctx.is_done() {
            let Some(due) = self.next_due() else {
                break;
            };
            let wait = due.saturating_sub(self.now);
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
            fired += self.advance(model, wait);
            observe(model);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TimerId;

    /// Counts ticks and keeps re-arming until `budget` runs out.
    struct Echo {
        seen: Vec<(TickToken, Duration)>,
        budget: usize,
        every: Duration,
        clock: Duration,
    }

    impl Model for Echo {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::Tick(token) => {
                    self.clock += self.every;
                    self.seen.push((token, self.clock));
                    if self.budget == 0 {
                        return None;
                    }
                    self.budget -= 1;
                    Some(Effect::Tick {
                        token,
                        after: self.every,
                    })
                }
                _ => None,
            }
        }
    }

    fn tok(timer: u32) -> TickToken {
        TickToken {
            timer: TimerId(timer),
            generation: 1,
        }
    }

    fn echo(budget: usize) -> Echo {
        Echo {
            seen: Vec::new(),
            budget,
            every: Duration::from_millis(10),
            clock: Duration::ZERO,
        }
    }

    #[test]
    fn advance_fires_due_ticks_in_order() {
        let mut s = Scheduler::new();
        let mut m = echo(0);
        s.schedule(Effect::Tick {
            token: tok(1),
            after: Duration::from_millis(20),
        });
        s.schedule(Effect::Tick {
            token: tok(2),
            after: Duration::from_millis(10),
        });
        s.schedule(Effect::Tick {
            token: tok(3),
            after: Duration::from_millis(10),
        });
        assert_eq!(s.advance(&mut m, Duration::from_millis(15)), 2);
        let order: Vec<_> = m.seen.iter().map(|(t, _)| t.timer.0).collect();
        assert_eq!(order, vec![2, 3]);
        assert_eq!(s.now(), Duration::from_millis(15));
        assert_eq!(s.next_due(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn rearmed_ticks_fire_within_the_same_advance() {
        let mut s = Scheduler::new();
        let mut m = echo(10);
        s.schedule(Effect::Tick {
            token: tok(0),
            after: Duration::from_millis(10),
        });
        assert_eq!(s.advance(&mut m, Duration::from_millis(35)), 3);
        assert_eq!(s.pending(), 1);
    }

    #[test]
    fn cancel_drops_only_that_timer() {
        let mut s = Scheduler::new();
        s.schedule(Effect::Batch(vec![
            Effect::Tick {
                token: tok(0),
                after: Duration::from_millis(5),
            },
            Effect::Tick {
                token: tok(1),
                after: Duration::from_millis(5),
            },
            Effect::Cancel(TimerId(0)),
        ]));
        assert_eq!(s.pending(), 1);
        let mut m = echo(0);
        assert_eq!(s.run_until_idle(&mut m, 10), 1);
        assert_eq!(m.seen[0].0.timer, TimerId(1));
        assert!(s.is_idle());
    }

    #[test]
    fn run_until_idle_respects_limit() {
        let mut s = Scheduler::new();
        let mut m = echo(usize::MAX);
        s.schedule(Effect::Tick {
            token: tok(0),
            after: Duration::from_millis(1),
        });
        assert_eq!(s.run_until_idle(&mut m, 50), 50);
        // First tick at 1ms, then one every 10ms.
        assert_eq!(s.now(), Duration::from_millis(1 + 49 * 10));
        assert_eq!(s.next_due(), Some(Duration::from_millis(501)));
    }

    #[test]
    fn realtime_stops_when_idle_or_cancelled() {
        let mut s = Scheduler::new();
        let mut m = echo(2);
        s.schedule(Effect::Tick {
            token: tok(0),
            after: Duration::from_millis(1),
        });
        let mut observed = 0;
        let fired = s.run_realtime(&mut m, &Context::new(), |_| observed += 1);
        assert_eq!(fired, 3);
        assert_eq!(observed, 3);

        let ctx = Context::new();
        ctx.cancel();
        s.schedule(Effect::Tick {
            token: tok(0),
            after: Duration::from_millis(1),
        });
        assert_eq!(s.run_realtime(&mut m, &ctx, |_| {}), 0);
        assert_eq!(s.pending(), 1);
    }
}
