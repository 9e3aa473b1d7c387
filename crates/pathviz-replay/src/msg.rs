//! User intents and timer ticks understood by [`Session`](crate::Session).

use pathviz_core::{Grid, Point};
use pathviz_paths::Algorithm;

use crate::app::TickToken;

/// What a press-and-hold repeats.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HoldAction {
    Step,
    Back,
}

/// A message delivered to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    ToggleWall(Point),
    MoveStart(Point),
    MoveEnd(Point),
    SetWeight(Point, i32),
    /// Replace the layout wholesale, e.g. with a generated preset.
    LoadGrid(Grid),
    /// Restore the blank layout from the session config.
    ResetGrid,
    /// Discard the current run but keep the layout.
    ResetPath,
    SelectAlgorithm(Algorithm),
    SelectAlgorithmA(Algorithm),
    SelectAlgorithmB(Algorithm),
    /// Raw speed value; see [`Speed`](crate::Speed).
    SetSpeed(u32),
    Play,
    Pause,
    TogglePlay,
    Step,
    Back,
    Seek(usize),
    HoldStart(HoldAction),
    HoldEnd,
    SetComparison(bool),
    Tick(TickToken),
}
