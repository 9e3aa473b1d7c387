//! Step log construction and positional navigation.
//!
//! A [`StepLog`] is built once per search result: every visited cell as a
//! [`StepKind::Visit`], then every path cell as a [`StepKind::PathMark`].
//! Applying steps only touches the replay marks of the grid, so walking
//! forward then back by the same count restores the marks exactly.

use pathviz_core::{Grid, Point};
use pathviz_paths::SearchResult;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    Visit,
    PathMark,
}

/// One replayable event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub pos: Point,
    pub kind: StepKind,
}

/// Visits followed by path marks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepLog {
    steps: Vec<Step>,
    visits: usize,
}

impl StepLog {
    pub fn build(result: &SearchResult) -> Self {
        let visits = result.visited_order.iter().map(|&pos| Step {
            pos,
            kind: StepKind::Visit,
        });
        let path = result.path.iter().map(|&pos| Step {
            pos,
            kind: StepKind::PathMark,
        });
        Self {
            steps: visits.chain(path).collect(),
            visits: result.visited_order.len(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<Step> {
        self.steps.get(i).copied()
    }

    /// Number of leading visit steps.
    #[inline]
    pub fn visits(&self) -> usize {
        self.visits
    }

    /// Number of trailing path steps.
    #[inline]
    pub fn path_steps(&self) -> usize {
        self.steps.len() - self.visits
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

fn mark(grid: &mut Grid, step: Step, on: bool) {
    if let Some(c) = grid.cell_mut(step.pos) {
        match step.kind {
            StepKind::Visit => c.marks.visited = on,
            StepKind::PathMark => c.marks.path = on,
        }
    }
}

/// Apply `log[index]` to `grid` and return the next index.
///
/// At or past the end of the log nothing is applied and the index is
/// clamped to `log.len()`.
pub fn apply_forward(grid: &mut Grid, log: &StepLog, index: usize) -> usize {
    match log.get(index) {
        Some(step) => {
            mark(grid, step, true);
            index + 1
        }
        None => index.min(log.len()),
    }
}

/// Undo `log[index - 1]` on `grid` and return the previous index.
///
/// At 0 nothing is undone. An index past the end is clamped first.
pub fn apply_backward(grid: &mut Grid, log: &StepLog, index: usize) -> usize {
    let index = index.min(log.len());
    if index == 0 {
        return 0;
    }
    if let Some(step) = log.get(index - 1) {
        mark(grid, step, false);
    }
    index - 1
}

/// A step log plus the index of the next step to apply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequencer {
    log: StepLog,
    index: usize,
}

impl Sequencer {
    pub fn new(log: StepLog) -> Self {
        Self { log, index: 0 }
    }

    pub fn log(&self) -> &StepLog {
        &self.log
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.index >= self.log.len()
    }

    /// Fraction of the log applied, in `[0, 1]`. An empty log counts as done.
    pub fn progress(&self) -> f64 {
        if self.log.is_empty() {
            1.0
        } else {
            self.index as f64 / self.log.len() as f64
        }
    }

    /// The most recently applied step.
    pub fn current(&self) -> Option<Step> {
        self.index.checked_sub(1).and_then(|i| self.log.get(i))
    }

    /// Apply one step. Returns whether anything changed.
    pub fn forward(&mut self, grid: &mut Grid) -> bool {
        let before = self.index;
        self.index = apply_forward(grid, &self.log, self.index);
        self.index != before
    }

    /// Undo one step. Returns whether anything changed.
    pub fn backward(&mut self, grid: &mut Grid) -> bool {
        let before = self.index;
        self.index = apply_backward(grid, &self.log, self.index);
        self.index != before
    }

    /// Move to `target` (clamped to the log length), in either direction.
    pub fn seek(&mut self, grid: &mut Grid, target: usize) -> usize {
        let target = target.min(self.log.len());
        while self.index < target {
            self.forward(grid);
        }
        while self.index > target {
            self.backward(grid);
        }
        self.index
    }

    pub fn rewind(&mut self, grid: &mut Grid) {
        self.seek(grid, 0);
    }
}
