//! **pathviz-replay** turns a finished search into a reversible animation.
//!
//! The layers, bottom up:
//!
//! - [`sequencer`]: flattens a [`SearchResult`](pathviz_paths::SearchResult)
//!   into a [`StepLog`] and walks it forward and backward over a grid.
//! - [`track`]: one side of playback, a display grid plus its log.
//! - [`player`]: the `Idle → Running ⇄ Paused` controller driving one or
//!   more tracks from a shared timer.
//! - [`session`]: the top-level [`Model`] owning the single and comparison
//!   players and routing [`Msg`]s to them.
//!
//! Nothing here sleeps or spawns. Timers are requested through
//! [`Effect`]s and fired by whichever driver runs the model, normally the
//! virtual-time [`Scheduler`].

pub mod app;
pub mod msg;
pub mod player;
pub mod scheduler;
pub mod sequencer;
pub mod session;
pub mod speed;
pub mod timer;
pub mod track;

pub use app::{Context, Effect, Model, TickToken, TimerId};
pub use msg::{HoldAction, Msg};
pub use player::{PlayState, Player};
pub use scheduler::Scheduler;
pub use sequencer::{Sequencer, Step, StepKind, StepLog, apply_backward, apply_forward};
pub use session::{Session, SessionConfig};
pub use speed::{DEFAULT_SPEED, SPEED_MAX, SPEED_MIN, Speed};
pub use timer::Timer;
pub use track::{Stats, Track};
