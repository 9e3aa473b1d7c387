//! The [`Cell`] type: one grid position with its layout and annotations.

use crate::geom::Point;

/// Sentinel cost meaning "not reached yet".
pub const UNREACHABLE: i32 = i32::MAX;

/// Transient annotations written by a search run.
///
/// Every algorithm resets these on the whole grid before it starts, so
/// their contents only describe the most recent run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchState {
    /// Discovered (BFS/DFS) or finalized (Dijkstra/A*).
    pub visited: bool,
    /// Cost from the start.
    pub g: i32,
    /// Heuristic estimate to the end (A* only).
    pub h: i32,
    /// `g + h`.
    pub f: i32,
    /// The cell that discovered this one. An index into the grid, never an
    /// owning reference.
    pub previous: Option<Point>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            visited: false,
            g: UNREACHABLE,
            h: 0,
            f: UNREACHABLE,
            previous: None,
        }
    }
}

/// Replay marks applied by the step sequencer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marks {
    pub visited: bool,
    pub path: bool,
}

impl Marks {
    #[inline]
    pub fn is_clear(self) -> bool {
        !self.visited && !self.path
    }
}

/// A grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub wall: bool,
    /// Cost of entering this cell. Always ≥ 1.
    pub weight: i32,
    pub search: SearchState,
    pub marks: Marks,
}

impl Cell {
    /// Set the wall flag (builder).
    #[inline]
    pub const fn with_wall(mut self, wall: bool) -> Self {
        self.wall = wall;
        self
    }

    /// Set the weight (builder). Values below 1 are raised to 1.
    #[inline]
    pub const fn with_weight(mut self, weight: i32) -> Self {
        self.weight = if weight < 1 { 1 } else { weight };
        self
    }

    /// Clear search annotations and replay marks, keeping the layout.
    #[inline]
    pub fn reset_annotations(&mut self) {
        self.search = SearchState::default();
        self.marks = Marks::default();
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self {
            wall: false,
            weight: 1,
            search: SearchState::default(),
            marks: Marks::default(),
        }
    }
}

/// How a cell should be drawn, in precedence order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellClass {
    Start,
    End,
    Wall,
    Path,
    Visited,
    Empty,
}

impl CellClass {
    /// The ASCII glyph used by [`Grid`](crate::Grid)'s `Display`.
    pub const fn glyph(self) -> char {
        match self {
            Self::Start => 'S',
            Self::End => 'E',
            Self::Wall => '#',
            Self::Path => '*',
            Self::Visited => 'o',
            Self::Empty => '.',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_open_floor() {
        let c = Cell::default();
        assert!(!c.wall);
        assert_eq!(c.weight, 1);
        assert_eq!(c.search.g, UNREACHABLE);
        assert!(c.search.previous.is_none());
        assert!(c.marks.is_clear());
    }

    #[test]
    fn weight_builder_clamps() {
        assert_eq!(Cell::default().with_weight(0).weight, 1);
        assert_eq!(Cell::default().with_weight(7).weight, 7);
    }

    #[test]
    fn reset_keeps_layout() {
        let mut c = Cell::default().with_wall(true).with_weight(3);
        c.search.visited = true;
        c.search.g = 4;
        c.search.previous = Some(Point::new(1, 1));
        c.marks.path = true;
        c.reset_annotations();
        assert!(c.wall);
        assert_eq!(c.weight, 3);
        assert_eq!(c.search, SearchState::default());
        assert!(c.marks.is_clear());
    }
}
